// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use common::value::Val;
use directive_core::{
    DirectiveRegistry, ResultItemId, SchemaError, Severity, ValidatedArguments,
    feedback::CoreFeedbackProvider, schema::ScalarType,
};
use directive_env::MapEnvironment;
use directive_resolvers::{
    Condition, DefaultValueConfig, DefaultValueDirective, FloatFieldValueTransformer,
    FloatTransform, TypedFieldValueDirective, feedback::DirectiveCommonsFeedbackProvider,
    register_builtins,
};
use serde_json::json;
use test_log::test;

mod support;

#[derive(Debug)]
struct Identity;

impl FloatFieldValueTransformer for Identity {
    fn directive_name(&self) -> &str {
        "identity"
    }

    fn transform_float(&self, value: f64, _arguments: &ValidatedArguments) -> f64 {
        value
    }
}

fn builtins(env: &MapEnvironment) -> DirectiveRegistry {
    let mut registry = DirectiveRegistry::new();
    register_builtins(&mut registry, env).unwrap();
    registry
}

#[test]
fn float_transform_reports_mismatches_and_leaves_them_alone() {
    let mut registry = DirectiveRegistry::new();
    registry
        .register(Arc::new(TypedFieldValueDirective::new(FloatTransform(
            Identity,
        ))))
        .unwrap();

    let ctx = support::run_query(
        registry,
        "{ price @identity }",
        &[],
        json!([
            {"id": 1, "price": null},
            {"id": 2, "price": 0.0},
            {"id": 3, "price": "abc"},
        ]),
    );

    support::assert_results(
        &ctx,
        json!([
            {"id": 1, "price": null},
            {"id": 2, "price": 0.0},
            {"id": 3, "price": "abc"},
        ]),
    );

    let errors = &ctx.feedback.errors;
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| e.code == DirectiveCommonsFeedbackProvider::E5
                && e.provider == "directive-commons")
    );
    assert_eq!(
        errors.iter().map(|e| e.item_id.clone()).collect::<Vec<_>>(),
        vec![Some(ResultItemId::Int(1)), Some(ResultItemId::Int(3))]
    );
    assert!(ctx.feedback.warnings.is_empty());
}

#[test]
fn default_injector_with_configured_default() {
    let mut registry = DirectiveRegistry::new();
    registry
        .register(Arc::new(DefaultValueDirective::new(
            "orNA",
            DefaultValueConfig {
                default_value: Some(Val::from("N/A")),
                default_condition: Condition::IsEmpty,
                zero_string_is_empty: false,
            },
        )))
        .unwrap();

    let ctx = support::run_query(
        registry,
        "{ name @orNA }",
        &[],
        json!([
            {"id": 1, "name": ""},
            {"id": 2, "name": "x"},
            {"id": 3, "name": null},
        ]),
    );

    support::assert_results(
        &ctx,
        json!([
            {"id": 1, "name": "N/A"},
            {"id": 2, "name": "x"},
            {"id": 3, "name": "N/A"},
        ]),
    );
    assert!(ctx.feedback.is_empty());
}

#[test]
fn builtins_run_in_query_order() {
    let ctx = support::run_query(
        builtins(&MapEnvironment::new()),
        r#"
        query ($places: Int) {
            id
            price @abs @round(decimals: $places) @withinRange(min: 0.0, max: 10.0)
            cost: price2 @floor
            label @default(value: "none", condition: IS_EMPTY)
        }
        "#,
        &[("places", Val::from(1i64))],
        json!([
            {"id": 1, "price": -3.14159, "price2": 2.7, "label": ""},
            {"id": 2, "price": 12.25, "price2": 2.7, "cost": -2.5, "label": "kept"},
        ]),
    );

    support::assert_results(
        &ctx,
        json!([
            {"id": 1, "price": 3.1, "price2": 2.7, "label": "none"},
            {"id": 2, "price": 12.3, "price2": 2.7, "cost": -3.0, "label": "kept"},
        ]),
    );

    // Item 1 has no `cost` key, so @floor sees a missing (null) value
    assert_eq!(ctx.feedback.errors.len(), 1);
    assert_eq!(ctx.feedback.errors[0].item_id, Some(ResultItemId::Int(1)));
    assert_eq!(ctx.feedback.errors[0].field.as_deref(), Some("cost"));

    assert_eq!(ctx.feedback.warnings.len(), 1);
    let warning = &ctx.feedback.warnings[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.code, DirectiveCommonsFeedbackProvider::W1);
    assert_eq!(warning.item_id, Some(ResultItemId::Int(2)));
    assert_eq!(
        warning.message,
        "Value 12.3 is outside the allowed range [0.0, 10.0]"
    );
}

#[test]
fn invalid_arguments_and_unknown_directives_become_feedback() {
    let ctx = support::run_query(
        builtins(&MapEnvironment::new()),
        r#"{ price @round(decimals: "two") @shout }"#,
        &[],
        json!([{"id": 1, "price": 1.55}, {"id": 2, "price": 2.45}]),
    );

    support::assert_results(
        &ctx,
        json!([{"id": 1, "price": 1.55}, {"id": 2, "price": 2.45}]),
    );

    let errors = &ctx.feedback.errors;
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].code, CoreFeedbackProvider::E1);
    assert_eq!(errors[1].code, CoreFeedbackProvider::E1);
    assert_eq!(errors[2].code, CoreFeedbackProvider::E2);
    assert_eq!(
        errors[2].message,
        "No directive resolver is registered under name '@shout'"
    );
}

#[test]
fn strict_range_check_is_an_error_but_keeps_the_value() {
    let ctx = support::run_query(
        builtins(&MapEnvironment::new()),
        "{ ratio @withinRange(max: 1.0, strict: true) }",
        &[],
        json!([{"id": "a", "ratio": 1.5}]),
    );

    support::assert_results(&ctx, json!([{"id": "a", "ratio": 1.5}]));
    assert_eq!(ctx.feedback.errors.len(), 1);
    assert_eq!(
        ctx.feedback.errors[0].item_id,
        Some(ResultItemId::from("a"))
    );
    assert_eq!(
        ctx.feedback.errors[0].message,
        "Value 1.5 is outside the allowed range [-inf, 1.0]"
    );
}

#[test]
fn abs_applied_twice_is_the_same_as_once() {
    let data = json!([{"id": 1, "v": -4.5}, {"id": 2, "v": 0.25}]);

    let once = support::run_query(
        builtins(&MapEnvironment::new()),
        "{ v @abs }",
        &[],
        data.clone(),
    );
    let twice = support::run_query(builtins(&MapEnvironment::new()), "{ v @abs @abs }", &[], data);

    assert_eq!(once.results, twice.results);
    assert!(twice.feedback.is_empty());
}

#[test]
fn default_configured_from_environment() {
    let env = MapEnvironment::from([
        ("DC_DEFAULT_VALUE", "0"),
        ("DC_DEFAULT_CONDITION", "IS_EMPTY"),
        ("DC_EMPTY_INCLUDES_ZERO_STRING", "true"),
    ]);

    let ctx = support::run_query(
        builtins(&env),
        "{ stock @default }",
        &[],
        json!([
            {"id": 1, "stock": "0"},
            {"id": 2, "stock": null},
            {"id": 3, "stock": 7},
        ]),
    );

    support::assert_results(
        &ctx,
        json!([
            {"id": 1, "stock": 0},
            {"id": 2, "stock": 0},
            {"id": 3, "stock": 7},
        ]),
    );
}

#[test]
fn schema_compatibility_of_builtins() {
    let registry = builtins(&MapEnvironment::new());

    for directive in ["abs", "ceil", "floor", "round", "withinRange"] {
        assert_eq!(
            registry.check_field_compatibility(directive, ScalarType::Float),
            Ok(())
        );
        assert_eq!(
            registry.check_field_compatibility(directive, ScalarType::Numeric),
            Ok(())
        );
        assert_eq!(
            registry.check_field_compatibility(directive, ScalarType::String),
            Err(SchemaError::UnsupportedFieldType {
                directive: directive.to_string(),
                field_type: ScalarType::String,
            })
        );
    }

    assert_eq!(
        registry.check_field_compatibility("default", ScalarType::String),
        Ok(())
    );
    assert_eq!(
        registry.check_field_compatibility("shout", ScalarType::String),
        Err(SchemaError::UnknownDirective("shout".to_string()))
    );
}
