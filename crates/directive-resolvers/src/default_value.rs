// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use common::{env_const, value::Val};
use directive_core::{
    DirectiveInvocation, DirectiveResolver, DirectiveTargets, ExecutionContext,
    schema::{ArgumentType, DirectiveArgumentDefinition, ScalarType},
    validate_directive_for_item,
};
use directive_env::{EnvError, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VALUE_ARGUMENT: &str = "value";
pub const CONDITION_ARGUMENT: &str = "condition";
const CONDITION_ENUM_NAME: &str = "DefaultCondition";

/// When a default value kicks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "IS_NULL")]
    IsNull,
    #[serde(rename = "IS_EMPTY")]
    IsEmpty,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::IsNull, Condition::IsEmpty];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Condition::IsNull => "IS_NULL",
            Condition::IsEmpty => "IS_EMPTY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == value)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Resolver-level settings, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultValueConfig {
    /// Used when the directive's `value` argument is absent or null. With no configured
    /// default, the argument is mandatory.
    pub default_value: Option<Val>,
    /// Used when the directive's `condition` argument is absent.
    pub default_condition: Condition,
    /// Whether the string `"0"` counts as empty under `IS_EMPTY` (on unless opted out).
    pub zero_string_is_empty: bool,
}

impl Default for DefaultValueConfig {
    fn default() -> Self {
        Self {
            default_value: None,
            default_condition: Condition::IsNull,
            zero_string_is_empty: true,
        }
    }
}

impl DefaultValueConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, ConfigError> {
        let default_condition = env_const::get_default_condition(env)?
            .as_deref()
            .and_then(Condition::parse)
            .unwrap_or(Condition::IsNull);

        Ok(Self {
            default_value: env_const::get_default_value(env)?.map(Val::from),
            default_condition,
            zero_string_is_empty: env_const::get_empty_includes_zero_string(env)?,
        })
    }
}

/// Replaces field values that match a condition (null, or empty) with a default value.
#[derive(Debug)]
pub struct DefaultValueDirective {
    name: String,
    config: DefaultValueConfig,
}

impl DefaultValueDirective {
    pub fn new(name: impl Into<String>, config: DefaultValueConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &DefaultValueConfig {
        &self.config
    }

    pub fn matches_condition(&self, condition: Condition, value: &Val) -> bool {
        match condition {
            Condition::IsNull => value.is_null(),
            Condition::IsEmpty => self.is_empty(value),
        }
    }

    fn is_empty(&self, value: &Val) -> bool {
        match value {
            Val::Null => true,
            Val::Bool(b) => !b,
            Val::Number(n) => n.is_zero(),
            Val::String(s) => s.is_empty() || (self.config.zero_string_is_empty && s == "0"),
            Val::List(l) => l.is_empty(),
            Val::Object(o) => o.is_empty(),
            Val::Binary(b) => b.is_empty(),
            Val::Enum(_) => false,
        }
    }
}

impl DirectiveResolver for DefaultValueDirective {
    fn directive_name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<String> {
        Some(match self.config.default_value {
            None => "If the value of the field matches the condition, replace it with the value provided under argument 'value'".to_string(),
            Some(_) => "If the value of the field matches the condition, replace it with either the value provided under argument 'value', or with a default value configured in the directive resolver".to_string(),
        })
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        let value = DirectiveArgumentDefinition::new(
            VALUE_ARGUMENT,
            ArgumentType::Scalar(ScalarType::Mixed),
        )
        .with_description("The value to use instead of the field's value");
        let value = match &self.config.default_value {
            None => value.mandatory(),
            Some(default_value) => value.with_default(default_value.clone()),
        };

        let condition = DirectiveArgumentDefinition::new(
            CONDITION_ARGUMENT,
            ArgumentType::Enum {
                name: CONDITION_ENUM_NAME.to_string(),
                values: Condition::ALL
                    .iter()
                    .map(|condition| condition.as_str().to_string())
                    .collect(),
            },
        )
        .with_description("Condition under which using the default value kicks in")
        .with_default(Val::Enum(self.config.default_condition.as_str().to_string()));

        vec![value, condition]
    }

    fn resolve_directive(
        &self,
        invocation: &DirectiveInvocation,
        targets: &DirectiveTargets,
        ctx: &mut ExecutionContext,
    ) {
        let definitions = self.argument_definitions();

        for (id, fields) in targets.iter() {
            let Some(arguments) = validate_directive_for_item(&definitions, invocation, id, ctx)
            else {
                continue;
            };

            let Some(default_value) = arguments
                .get_non_null(VALUE_ARGUMENT)
                .or(self.config.default_value.as_ref())
                .cloned()
            else {
                continue;
            };
            let condition = arguments
                .get_str(CONDITION_ARGUMENT)
                .and_then(Condition::parse)
                .unwrap_or(self.config.default_condition);

            for field in &fields.direct {
                let output_key = field.output_key();
                let matches = ctx
                    .results
                    .get(id, output_key)
                    .is_some_and(|value| self.matches_condition(condition, value));

                if matches {
                    ctx.results.set(id, output_key, default_value.clone());
                }
            }
        }
    }
}
