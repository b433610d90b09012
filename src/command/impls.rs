// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! A module containing boiler-plate implementations of standard traits such as Default, From etc etc

use crate::{ViewMapError, command::Options};
use std::{collections::HashMap, str::FromStr};

impl Options for HashMap<String, String> {
    /// Will return an option parsed as a `T` or an Err
    fn get_mandatory_parsed_option<T: FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, ViewMapError> {
        match self.get(key) {
            Some(v) => match v.trim().parse() {
                Ok(val) => Ok(val),
                Err(_) => Err(ViewMapError::InvalidParameter(format!(
                    "Invalid value for parameter {{\"{key}\"}}: {{\"{v}\"}}"
                ))),
            },
            None => {
                if let Some(default_value) = default {
                    Ok(default_value)
                } else {
                    Err(ViewMapError::MissingParameter(format!(
                        "The mandatory parameter \"{key}\" was missing"
                    )))
                }
            }
        }
    }

    /// Will return an option parsed as a `T` or None.
    /// If the option is missing None is returned, if it there but if it can't be parsed an error
    /// will be returned.
    fn get_parsed_option<T: FromStr>(&self, key: &str) -> Result<Option<T>, ViewMapError> {
        match self.get(key) {
            Some(v) => match v.trim().parse() {
                Ok(val) => Ok(Some(val)),
                Err(_) => Err(ViewMapError::InvalidParameter(format!(
                    "Invalid value for parameter {{\"{key}\"}}: {{\"{v}\"}}"
                ))),
            },
            None => Ok(None),
        }
    }

    /// Returns the &str value of an option, or an Err is it does not exists
    fn get_mandatory_option(&self, key: &str) -> Result<&str, ViewMapError> {
        match self.get(key) {
            Some(v) => Ok(v),
            None => Err(ViewMapError::MissingParameter(format!(
                "The parameter {{\"{key}\"}} was missing"
            ))),
        }
    }

    /// Checks if an option exists
    fn does_option_exist(&self, key: &str) -> Result<bool, ViewMapError> {
        Ok(self.contains_key(key))
    }
}
