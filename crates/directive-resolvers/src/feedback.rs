// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use directive_core::FeedbackProvider;

pub struct DirectiveCommonsFeedbackProvider;

impl DirectiveCommonsFeedbackProvider {
    /// A typed directive met a value of the wrong type.
    pub const E4: &'static str = "e4";
    /// A float directive met a value that is not a float.
    pub const E5: &'static str = "e5";
    /// A value falls outside the range given to `@withinRange`.
    pub const W1: &'static str = "w1";
}

impl FeedbackProvider for DirectiveCommonsFeedbackProvider {
    fn name(&self) -> &'static str {
        "directive-commons"
    }

    fn message_template(&self, code: &str) -> Option<&'static str> {
        match code {
            Self::E4 => Some(
                "Directive '@{0}' cannot be applied on field '{1}' for object with ID '{2}', since its value of type '{3}' is not supported",
            ),
            Self::E5 => Some(
                "Directive '@{0}' cannot be applied on field '{1}' for object with ID '{2}', since its value is not a float",
            ),
            Self::W1 => Some("Value {0} is outside the allowed range [{1}, {2}]"),
            _ => None,
        }
    }
}
