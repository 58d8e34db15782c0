// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::{Val, ValNumber};
use directive_core::{
    FeedbackEntry, Field, ResultItemId, Severity, ValidatedArguments,
    schema::{DirectiveArgumentDefinition, ScalarType},
};

use crate::{
    feedback::DirectiveCommonsFeedbackProvider,
    typed_transform::{TypedFieldValueTransformer, ValidationPayload},
};

/// A transformation of float field values (`f64` in, `f64` out).
pub trait FloatFieldValueTransformer: std::fmt::Debug + Send + Sync {
    fn directive_name(&self) -> &str;

    fn description(&self) -> Option<String> {
        None
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        vec![]
    }

    fn transform_float(&self, value: f64, arguments: &ValidatedArguments) -> f64;

    fn validate_float(
        &self,
        _value: f64,
        _arguments: &ValidatedArguments,
    ) -> Option<ValidationPayload> {
        None
    }
}

/// Lifts a [`FloatFieldValueTransformer`] into a [`TypedFieldValueTransformer`].
///
/// Only `F32`/`F64` values match: integers are not floats, even where the field type is
/// `Numeric`. `F32` values stay `F32`.
#[derive(Debug)]
pub struct FloatTransform<T>(pub T);

impl<T: FloatFieldValueTransformer> TypedFieldValueTransformer for FloatTransform<T> {
    fn directive_name(&self) -> &str {
        self.0.directive_name()
    }

    fn description(&self) -> Option<String> {
        self.0.description()
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        self.0.argument_definitions()
    }

    fn supported_field_types(&self) -> Vec<ScalarType> {
        vec![
            ScalarType::Float,
            ScalarType::Numeric,
            ScalarType::AnyBuiltInScalar,
        ]
    }

    fn is_matching_type(&self, value: &Val) -> bool {
        value.is_float()
    }

    fn transform(&self, value: Val, arguments: &ValidatedArguments) -> Val {
        match value {
            Val::Number(ValNumber::F64(n)) => {
                Val::Number(ValNumber::F64(self.0.transform_float(n, arguments)))
            }
            Val::Number(ValNumber::F32(n)) => Val::Number(ValNumber::F32(
                self.0.transform_float(n as f64, arguments) as f32,
            )),
            other => other,
        }
    }

    fn validate(&self, value: &Val, arguments: &ValidatedArguments) -> Option<ValidationPayload> {
        match value {
            Val::Number(n) if n.is_float() => self.0.validate_float(n.as_f64(), arguments),
            _ => None,
        }
    }

    fn non_matching_type_feedback(
        &self,
        _value: &Val,
        id: &ResultItemId,
        field: &Field,
    ) -> FeedbackEntry {
        FeedbackEntry::new(
            Severity::Error,
            &DirectiveCommonsFeedbackProvider,
            DirectiveCommonsFeedbackProvider::E5,
            vec![
                self.directive_name().to_string(),
                field.output_key().to_string(),
                id.to_string(),
            ],
        )
    }
}
