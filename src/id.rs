// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Identifier pair shared by every view map entity.


use std::fmt;

/// An identifier pair `(first, second)`, ordered lexicographically.
///
/// `Id` is `Copy`: storing an id in an entity always stores a copy, so mutating the original
/// afterwards never reaches the stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    first: u32,
    second: u32,
}

impl Id {
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    #[inline(always)]
    pub fn first(&self) -> u32 {
        self.first
    }

    #[inline(always)]
    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn set_first(&mut self, first: u32) {
        self.first = first
    }

    pub fn set_second(&mut self, second: u32) {
        self.second = second
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.second)
    }
}

impl From<(u32, u32)> for Id {
    #[inline(always)]
    fn from(pair: (u32, u32)) -> Self {
        Self::new(pair.0, pair.1)
    }
}

impl From<u32> for Id {
    #[inline(always)]
    fn from(first: u32) -> Self {
        Self::new(first, 0)
    }
}
