// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Ready-made directives: `@abs`, `@ceil`, `@floor`, `@round`, `@withinRange` and `@default`.

use std::sync::Arc;

use common::value::Val;
use directive_core::{
    DirectiveRegistry, SchemaError, Severity, ValidatedArguments,
    schema::{ArgumentType, DirectiveArgumentDefinition, ScalarType},
};
use directive_env::Environment;
use thiserror::Error;

use crate::{
    default_value::{ConfigError, DefaultValueConfig, DefaultValueDirective},
    feedback::DirectiveCommonsFeedbackProvider,
    float_transform::{FloatFieldValueTransformer, FloatTransform},
    typed_transform::{TypedFieldValueDirective, ValidationPayload},
};

/// `f64` keeps about 15 significant decimal digits, so rounding beyond that is a no-op.
const MAX_DECIMALS: i64 = 15;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Register every built-in directive. `@default` picks up its configuration from `env`.
pub fn register_builtins(
    registry: &mut DirectiveRegistry,
    env: &dyn Environment,
) -> Result<(), RegistrationError> {
    registry.register(float_directive(Abs))?;
    registry.register(float_directive(Ceil))?;
    registry.register(float_directive(Floor))?;
    registry.register(float_directive(Round))?;
    registry.register(float_directive(WithinRange))?;
    registry.register(Arc::new(DefaultValueDirective::new(
        "default",
        DefaultValueConfig::from_env(env)?,
    )))?;
    Ok(())
}

fn float_directive<T: FloatFieldValueTransformer + 'static>(
    transformer: T,
) -> Arc<TypedFieldValueDirective<FloatTransform<T>>> {
    Arc::new(TypedFieldValueDirective::new(FloatTransform(transformer)))
}

#[derive(Debug)]
pub struct Abs;

impl FloatFieldValueTransformer for Abs {
    fn directive_name(&self) -> &str {
        "abs"
    }

    fn description(&self) -> Option<String> {
        Some("Replace the value with its absolute value".to_string())
    }

    fn transform_float(&self, value: f64, _arguments: &ValidatedArguments) -> f64 {
        value.abs()
    }
}

#[derive(Debug)]
pub struct Ceil;

impl FloatFieldValueTransformer for Ceil {
    fn directive_name(&self) -> &str {
        "ceil"
    }

    fn description(&self) -> Option<String> {
        Some("Round the value up to the nearest integer".to_string())
    }

    fn transform_float(&self, value: f64, _arguments: &ValidatedArguments) -> f64 {
        value.ceil()
    }
}

#[derive(Debug)]
pub struct Floor;

impl FloatFieldValueTransformer for Floor {
    fn directive_name(&self) -> &str {
        "floor"
    }

    fn description(&self) -> Option<String> {
        Some("Round the value down to the nearest integer".to_string())
    }

    fn transform_float(&self, value: f64, _arguments: &ValidatedArguments) -> f64 {
        value.floor()
    }
}

#[derive(Debug)]
pub struct Round;

impl Round {
    const DECIMALS: &'static str = "decimals";
}

impl FloatFieldValueTransformer for Round {
    fn directive_name(&self) -> &str {
        "round"
    }

    fn description(&self) -> Option<String> {
        Some("Round the value to the given number of decimals, half away from zero".to_string())
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        vec![
            DirectiveArgumentDefinition::new(Self::DECIMALS, ArgumentType::Scalar(ScalarType::Int))
                .with_description(
                    "Number of decimals to keep. Negative values round to tens, hundreds, etc.",
                )
                .with_default(0i64.into()),
        ]
    }

    fn transform_float(&self, value: f64, arguments: &ValidatedArguments) -> f64 {
        let decimals = arguments
            .get_i64(Self::DECIMALS)
            .unwrap_or(0)
            .clamp(-MAX_DECIMALS, MAX_DECIMALS) as i32;

        let rounded = if decimals >= 0 {
            let factor = 10f64.powi(decimals);
            (value * factor).round() / factor
        } else {
            let factor = 10f64.powi(-decimals);
            (value / factor).round() * factor
        };

        // Scaling can overflow for very large values, which are already integral
        if rounded.is_finite() { rounded } else { value }
    }
}

#[derive(Debug)]
pub struct WithinRange;

impl WithinRange {
    const MIN: &'static str = "min";
    const MAX: &'static str = "max";
    const STRICT: &'static str = "strict";
}

impl FloatFieldValueTransformer for WithinRange {
    fn directive_name(&self) -> &str {
        "withinRange"
    }

    fn description(&self) -> Option<String> {
        Some(
            "Report values outside the range [min, max]. The value itself is left unchanged"
                .to_string(),
        )
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        vec![
            DirectiveArgumentDefinition::new(Self::MIN, ArgumentType::Scalar(ScalarType::Float))
                .with_description("Lower bound (inclusive)"),
            DirectiveArgumentDefinition::new(Self::MAX, ArgumentType::Scalar(ScalarType::Float))
                .with_description("Upper bound (inclusive)"),
            DirectiveArgumentDefinition::new(
                Self::STRICT,
                ArgumentType::Scalar(ScalarType::Boolean),
            )
            .with_description("Report out-of-range values as errors instead of warnings")
            .with_default(false.into()),
        ]
    }

    fn transform_float(&self, value: f64, _arguments: &ValidatedArguments) -> f64 {
        value
    }

    fn validate_float(&self, value: f64, arguments: &ValidatedArguments) -> Option<ValidationPayload> {
        let min = arguments.get_f64(Self::MIN).unwrap_or(f64::NEG_INFINITY);
        let max = arguments.get_f64(Self::MAX).unwrap_or(f64::INFINITY);

        if (min..=max).contains(&value) {
            return None;
        }

        let strict = matches!(
            arguments.get(Self::STRICT),
            Some(Val::Bool(true))
        );

        Some(ValidationPayload {
            severity: if strict {
                Severity::Error
            } else {
                Severity::Warning
            },
            code: DirectiveCommonsFeedbackProvider::W1,
            args: vec![format!("{value:?}"), format!("{min:?}"), format!("{max:?}")],
        })
    }
}
