// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_value::Value;
use common::value::{Val, ValNumber};
use indexmap::IndexMap;

use super::{ArgumentValidationError, ValidatedArguments};
use crate::schema::{ArgumentType, DirectiveArgumentDefinition, ScalarType};

pub struct ArgumentValidator<'a> {
    directive_name: &'a str,
    definitions: &'a [DirectiveArgumentDefinition],
    variables: &'a HashMap<String, Val>,
    item_expressions: Option<&'a HashMap<String, Val>>,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(
        directive_name: &'a str,
        definitions: &'a [DirectiveArgumentDefinition],
        variables: &'a HashMap<String, Val>,
        item_expressions: Option<&'a HashMap<String, Val>>,
    ) -> Self {
        Self {
            directive_name,
            definitions,
            variables,
            item_expressions,
        }
    }

    /// Validations performed:
    /// - Ensure that all mandatory arguments are provided (and not null)
    /// - Ensure that there are no stray arguments (arguments that are not declared by the directive)
    /// - Ensure that each value matches the declared type, coercing where GraphQL allows it
    ///
    /// Absent optional arguments take their declared default, if any.
    pub fn validate(
        &self,
        arguments: &IndexMap<String, Value>,
    ) -> Result<ValidatedArguments, ArgumentValidationError> {
        // Stray arguments tracking: 1. Maintain a map of all the arguments supplied in the query
        let mut supplied: IndexMap<&str, &Value> = arguments
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();

        let validated = self
            .definitions
            .iter()
            .filter_map(|definition| {
                // Stray arguments tracking: 2. Remove the argument being processed
                let value = supplied.shift_remove(definition.name.as_str());

                self.validate_argument(definition, value)
                    .map(|value| value.map(|value| (definition.name.clone(), value)))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        // Stray arguments tracking: 3. Anything left was not declared by the directive
        if !supplied.is_empty() {
            Err(ArgumentValidationError::StrayArguments(
                supplied.keys().map(|name| name.to_string()).collect(),
                self.directive_name.to_string(),
            ))
        } else {
            Ok(ValidatedArguments::new(validated))
        }
    }

    fn validate_argument(
        &self,
        definition: &DirectiveArgumentDefinition,
        value: Option<&Value>,
    ) -> Option<Result<Val, ArgumentValidationError>> {
        match value {
            Some(value) => Some(
                self.resolve_value(&definition.name, value)
                    .and_then(|value| validate_value(definition, value)),
            ),
            None => match &definition.default_value {
                Some(default_value) => Some(Ok(default_value.clone())),
                None if definition.mandatory => Some(Err(
                    ArgumentValidationError::RequiredArgumentNotFound(definition.name.clone()),
                )),
                None => None,
            },
        }
    }

    fn lookup_variable(&self, name: &str) -> Option<&Val> {
        self.item_expressions
            .and_then(|expressions| expressions.get(name))
            .or_else(|| self.variables.get(name))
    }

    fn resolve_value(
        &self,
        argument_name: &str,
        value: &Value,
    ) -> Result<Val, ArgumentValidationError> {
        match value {
            Value::Variable(name) => self
                .lookup_variable(name.as_str())
                .cloned()
                .ok_or_else(|| ArgumentValidationError::VariableNotFound(name.to_string())),
            Value::Null => Ok(Val::Null),
            Value::Number(number) => ValNumber::try_from(number.clone())
                .map(Val::Number)
                .map_err(|_| ArgumentValidationError::InvalidNumber(argument_name.to_string())),
            Value::String(string) => Ok(Val::String(string.clone())),
            Value::Boolean(boolean) => Ok(Val::Bool(*boolean)),
            Value::Binary(binary) => Ok(Val::Binary(binary.clone())),
            Value::Enum(e) => Ok(Val::Enum(e.to_string())),
            Value::List(elems) => elems
                .iter()
                .map(|elem| self.resolve_value(argument_name, elem))
                .collect::<Result<_, _>>()
                .map(Val::List),
            Value::Object(object) => object
                .iter()
                .map(|(key, elem)| Ok((key.to_string(), self.resolve_value(argument_name, elem)?)))
                .collect::<Result<_, _>>()
                .map(Val::Object),
        }
    }
}

fn validate_value(
    definition: &DirectiveArgumentDefinition,
    value: Val,
) -> Result<Val, ArgumentValidationError> {
    if value.is_null() {
        if definition.mandatory {
            Err(ArgumentValidationError::NullForMandatoryArgument(
                definition.name.clone(),
            ))
        } else {
            Ok(Val::Null)
        }
    } else {
        coerce(&definition.name, &definition.ty, value)
    }
}

fn coerce(
    argument_name: &str,
    ty: &ArgumentType,
    value: Val,
) -> Result<Val, ArgumentValidationError> {
    match (ty, value) {
        (ArgumentType::Scalar(scalar), value) => coerce_scalar(argument_name, ty, *scalar, value),
        (ArgumentType::Enum { values, .. }, Val::Enum(value) | Val::String(value)) => {
            if values.contains(&value) {
                Ok(Val::Enum(value))
            } else {
                Err(ArgumentValidationError::InvalidEnumValue {
                    argument_name: argument_name.to_string(),
                    value,
                    allowed: values.clone(),
                })
            }
        }
        (ArgumentType::List(inner), Val::List(elems)) => elems
            .into_iter()
            .map(|elem| match elem {
                Val::Null => Ok(Val::Null),
                elem => coerce(argument_name, inner, elem),
            })
            .collect::<Result<_, _>>()
            .map(Val::List),
        // A single value where a list is expected is a list of one
        (ArgumentType::List(inner), value) => {
            Ok(Val::List(vec![coerce(argument_name, inner, value)?]))
        }
        (ty, value) => Err(invalid_type(argument_name, ty, &value)),
    }
}

fn coerce_scalar(
    argument_name: &str,
    ty: &ArgumentType,
    scalar: ScalarType,
    value: Val,
) -> Result<Val, ArgumentValidationError> {
    match (scalar, value) {
        (ScalarType::Int, Val::Number(n)) if n.as_i64().is_some() => Ok(Val::Number(n)),
        (ScalarType::Float, Val::Number(n)) => Ok(Val::Number(ValNumber::F64(n.as_f64()))),
        (ScalarType::Numeric, Val::Number(n)) => Ok(Val::Number(n)),
        (ScalarType::String | ScalarType::Id, Val::String(s)) => Ok(Val::String(s)),
        (ScalarType::Id, Val::Number(n)) if n.as_i64().is_some() => Ok(Val::String(n.to_string())),
        (ScalarType::Boolean, Val::Bool(b)) => Ok(Val::Bool(b)),
        (
            ScalarType::AnyBuiltInScalar,
            value @ (Val::Bool(_) | Val::Number(_) | Val::String(_)),
        ) => Ok(value),
        (ScalarType::Mixed, value) => Ok(value),
        (_, value) => Err(invalid_type(argument_name, ty, &value)),
    }
}

fn invalid_type(argument_name: &str, ty: &ArgumentType, value: &Val) -> ArgumentValidationError {
    ArgumentValidationError::InvalidArgumentType {
        argument_name: argument_name.to_string(),
        expected_type: ty.to_string(),
        actual_type: value.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::field_directives;

    fn definitions() -> Vec<DirectiveArgumentDefinition> {
        vec![
            DirectiveArgumentDefinition::new("value", ArgumentType::Scalar(ScalarType::Mixed))
                .mandatory(),
            DirectiveArgumentDefinition::new(
                "condition",
                ArgumentType::Enum {
                    name: "DefaultCondition".into(),
                    values: vec!["IS_NULL".into(), "IS_EMPTY".into()],
                },
            )
            .with_default(Val::Enum("IS_NULL".into())),
            DirectiveArgumentDefinition::new("decimals", ArgumentType::Scalar(ScalarType::Int)),
            DirectiveArgumentDefinition::new("min", ArgumentType::Scalar(ScalarType::Float)),
        ]
    }

    fn arguments_of(query: &str) -> IndexMap<String, Value> {
        let bound = field_directives(query).unwrap();
        bound[0].1[0].arguments.clone()
    }

    fn validate(
        query: &str,
        variables: &HashMap<String, Val>,
        item_expressions: Option<&HashMap<String, Val>>,
    ) -> Result<ValidatedArguments, ArgumentValidationError> {
        let definitions = definitions();
        ArgumentValidator::new("test", &definitions, variables, item_expressions)
            .validate(&arguments_of(query))
    }

    #[test]
    fn fills_defaults_and_coerces() {
        let validated = validate(
            r#"{ name @test(value: "N/A", min: 1) }"#,
            &HashMap::new(),
            None,
        )
        .unwrap();

        assert_eq!(validated.get("value"), Some(&Val::from("N/A")));
        assert_eq!(validated.get("condition"), Some(&Val::Enum("IS_NULL".into())));
        assert_eq!(validated.get("min"), Some(&Val::from(1.0)));
        assert_eq!(validated.get("decimals"), None);
    }

    #[test]
    fn enum_accepts_strings_and_literals() {
        let from_literal = validate(
            r#"{ name @test(value: 1, condition: IS_EMPTY) }"#,
            &HashMap::new(),
            None,
        )
        .unwrap();
        let from_string = validate(
            r#"{ name @test(value: 1, condition: "IS_EMPTY") }"#,
            &HashMap::new(),
            None,
        )
        .unwrap();

        assert_eq!(from_literal.get("condition"), from_string.get("condition"));
        assert_eq!(from_literal.get_str("condition"), Some("IS_EMPTY"));
    }

    #[test]
    fn item_expressions_shadow_variables() {
        let variables = HashMap::from([("places".to_string(), Val::from(2i64))]);
        let item_expressions = HashMap::from([("places".to_string(), Val::from(4i64))]);
        let query = r#"query ($places: Int) { price @test(value: 0, decimals: $places) }"#;

        let global = validate(query, &variables, None).unwrap();
        let per_item = validate(query, &variables, Some(&item_expressions)).unwrap();

        assert_eq!(global.get_i64("decimals"), Some(2));
        assert_eq!(per_item.get_i64("decimals"), Some(4));
    }

    #[test]
    fn nested_variables_are_resolved() {
        let variables = HashMap::from([("fallback".to_string(), Val::from("x"))]);
        let validated = validate(
            r#"query ($fallback: String) { tags @test(value: ["a", $fallback]) }"#,
            &variables,
            None,
        )
        .unwrap();

        assert_eq!(
            validated.get("value"),
            Some(&Val::List(vec![Val::from("a"), Val::from("x")]))
        );
    }

    #[test]
    fn explicit_null_is_kept_for_optional_arguments() {
        let validated = validate(
            r#"{ price @test(value: 0, min: null) }"#,
            &HashMap::new(),
            None,
        )
        .unwrap();

        assert_eq!(validated.get("min"), Some(&Val::Null));
        assert_eq!(validated.get_non_null("min"), None);
    }

    #[test]
    fn reports_invalid_arguments() {
        let no_variables = HashMap::new();
        let cases = [
            (
                r#"{ a @test(condition: IS_NULL) }"#,
                ArgumentValidationError::RequiredArgumentNotFound("value".into()),
            ),
            (
                r#"{ a @test(value: null) }"#,
                ArgumentValidationError::NullForMandatoryArgument("value".into()),
            ),
            (
                r#"{ a @test(value: 1, extra: 2) }"#,
                ArgumentValidationError::StrayArguments(vec!["extra".into()], "test".into()),
            ),
            (
                r#"{ a @test(value: 1, decimals: 1.5) }"#,
                ArgumentValidationError::InvalidArgumentType {
                    argument_name: "decimals".into(),
                    expected_type: "Int".into(),
                    actual_type: "float".into(),
                },
            ),
            (
                r#"{ a @test(value: 1, condition: IS_BLANK) }"#,
                ArgumentValidationError::InvalidEnumValue {
                    argument_name: "condition".into(),
                    value: "IS_BLANK".into(),
                    allowed: vec!["IS_NULL".into(), "IS_EMPTY".into()],
                },
            ),
            (
                r#"query ($v: Int) { a @test(value: $v) }"#,
                ArgumentValidationError::VariableNotFound("v".into()),
            ),
        ];

        for (query, expected) in cases {
            assert_eq!(validate(query, &no_variables, None), Err(expected), "{query}");
        }
    }
}
