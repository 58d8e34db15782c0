// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ArgumentValidationError {
    #[error("Variable '{0}' not found")]
    VariableNotFound(String),

    #[error("Required argument '{0}' not found")]
    RequiredArgumentNotFound(String),

    #[error("Argument '{0}' is mandatory and cannot be null")]
    NullForMandatoryArgument(String),

    #[error("Argument(s) '{0:?}' invalid for '@{1}'")]
    StrayArguments(Vec<String>, String),

    #[error(
        "Argument '{argument_name}' is not of a valid type. Expected '{expected_type}', got '{actual_type}'"
    )]
    InvalidArgumentType {
        argument_name: String,
        expected_type: String,
        actual_type: String,
    },

    #[error("Value '{value}' for argument '{argument_name}' is not one of {allowed:?}")]
    InvalidEnumValue {
        argument_name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Argument '{0}' holds a number that cannot be represented")]
    InvalidNumber(String),
}
