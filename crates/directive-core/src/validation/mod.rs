// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validate a directive's arguments for one result item.
//!
//! Take the arguments as written in the query, resolve variables (per-item expressions first,
//! then the query's variables) and check them against the directive's declared argument shape.

mod arguments_validator;
mod validation_error;

pub use arguments_validator::ArgumentValidator;
pub use validation_error::ArgumentValidationError;

use common::value::Val;
use indexmap::IndexMap;
use serde::Serialize;

/// Arguments of one directive application, as validated for one result item.
///
/// Absent optional arguments without a declared default are not present at all; an explicit
/// `null` is kept as [`Val::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedArguments(IndexMap<String, Val>);

impl ValidatedArguments {
    pub fn new(arguments: IndexMap<String, Val>) -> Self {
        Self(arguments)
    }

    pub fn get(&self, name: &str) -> Option<&Val> {
        self.0.get(name)
    }

    /// The argument's value, treating an explicit `null` as absent.
    pub fn get_non_null(&self, name: &str) -> Option<&Val> {
        self.get(name).filter(|value| !value.is_null())
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Val::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Val::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Val::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Val)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, Val); N]> for ValidatedArguments {
    fn from(arguments: [(&str, Val); N]) -> Self {
        Self(
            arguments
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}
