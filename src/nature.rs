// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Feature-kind bits for edges and vertices.


use std::{fmt, ops};

/// A bitset describing what kind of feature an edge or vertex is.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nature(u16);

impl Nature {
    pub const NO_FEATURE: Self = Self(0);

    // edge natures
    pub const SILHOUETTE: Self = Self(1 << 0);
    pub const BORDER: Self = Self(1 << 1);
    pub const CREASE: Self = Self(1 << 2);
    pub const RIDGE: Self = Self(1 << 3);
    pub const VALLEY: Self = Self(1 << 4);
    pub const SUGGESTIVE_CONTOUR: Self = Self(1 << 5);
    pub const MATERIAL_BOUNDARY: Self = Self(1 << 6);
    pub const EDGE_MARK: Self = Self(1 << 7);

    // vertex natures
    pub const S_VERTEX: Self = Self(1 << 8);
    pub const VIEW_VERTEX: Self = Self(1 << 9);
    pub const NON_T_VERTEX: Self = Self(1 << 10);
    pub const T_VERTEX: Self = Self(1 << 11);
    pub const CUSP: Self = Self(1 << 12);

    const NAMES: [(Self, &'static str); 13] = [
        (Self::SILHOUETTE, "SILHOUETTE"),
        (Self::BORDER, "BORDER"),
        (Self::CREASE, "CREASE"),
        (Self::RIDGE, "RIDGE"),
        (Self::VALLEY, "VALLEY"),
        (Self::SUGGESTIVE_CONTOUR, "SUGGESTIVE_CONTOUR"),
        (Self::MATERIAL_BOUNDARY, "MATERIAL_BOUNDARY"),
        (Self::EDGE_MARK, "EDGE_MARK"),
        (Self::S_VERTEX, "S_VERTEX"),
        (Self::VIEW_VERTEX, "VIEW_VERTEX"),
        (Self::NON_T_VERTEX, "NON_T_VERTEX"),
        (Self::T_VERTEX, "T_VERTEX"),
        (Self::CUSP, "CUSP"),
    ];

    #[inline(always)]
    pub fn bits(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl ops::BitOr for Nature {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Nature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitAnd for Nature {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NO_FEATURE");
        }
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.contains(bit) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
