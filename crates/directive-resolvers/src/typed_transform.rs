// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::Val;
use directive_core::{
    DirectiveInvocation, DirectiveResolver, DirectiveTargets, ExecutionContext, FeedbackEntry,
    FeedbackProvider, Field, ResultItemId, Severity, ValidatedArguments,
    schema::{DirectiveArgumentDefinition, ScalarType},
    validate_directive_for_item,
};
use tracing::debug;

use crate::feedback::DirectiveCommonsFeedbackProvider;

/// A problem found with a transformed value. The value is committed regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPayload {
    pub severity: Severity,
    pub code: &'static str,
    pub args: Vec<String>,
}

/// A transformation that only applies to values of one runtime type.
///
/// `transform` and `validate` are only called with values for which `is_matching_type`
/// holds, and must be pure.
pub trait TypedFieldValueTransformer: std::fmt::Debug + Send + Sync {
    fn directive_name(&self) -> &str;

    fn description(&self) -> Option<String> {
        None
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        vec![]
    }

    fn supported_field_types(&self) -> Vec<ScalarType>;

    fn is_matching_type(&self, value: &Val) -> bool;

    /// Must return a value of the same type it was given.
    fn transform(&self, value: Val, arguments: &ValidatedArguments) -> Val;

    fn validate(&self, _value: &Val, _arguments: &ValidatedArguments) -> Option<ValidationPayload> {
        None
    }

    /// Provider of the codes used by `validate` and `non_matching_type_feedback`.
    fn feedback_provider(&self) -> &dyn FeedbackProvider {
        &DirectiveCommonsFeedbackProvider
    }

    fn non_matching_type_feedback(
        &self,
        value: &Val,
        id: &ResultItemId,
        field: &Field,
    ) -> FeedbackEntry {
        FeedbackEntry::new(
            Severity::Error,
            &DirectiveCommonsFeedbackProvider,
            DirectiveCommonsFeedbackProvider::E4,
            vec![
                self.directive_name().to_string(),
                field.output_key().to_string(),
                id.to_string(),
                value.type_name().to_string(),
            ],
        )
    }
}

/// Runs a [`TypedFieldValueTransformer`] over every targeted (item, field) pair.
#[derive(Debug)]
pub struct TypedFieldValueDirective<T> {
    transformer: T,
}

impl<T: TypedFieldValueTransformer> TypedFieldValueDirective<T> {
    pub fn new(transformer: T) -> Self {
        Self { transformer }
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }
}

impl<T: TypedFieldValueTransformer> DirectiveResolver for TypedFieldValueDirective<T> {
    fn directive_name(&self) -> &str {
        self.transformer.directive_name()
    }

    fn description(&self) -> Option<String> {
        self.transformer.description()
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        self.transformer.argument_definitions()
    }

    fn supported_field_types(&self) -> Option<Vec<ScalarType>> {
        Some(self.transformer.supported_field_types())
    }

    fn resolve_directive(
        &self,
        invocation: &DirectiveInvocation,
        targets: &DirectiveTargets,
        ctx: &mut ExecutionContext,
    ) {
        let definitions = self.transformer.argument_definitions();

        for (id, fields) in targets.iter() {
            let Some(arguments) = validate_directive_for_item(&definitions, invocation, id, ctx)
            else {
                continue;
            };

            for field in &fields.direct {
                let output_key = field.output_key();
                let value = ctx
                    .results
                    .get(id, output_key)
                    .cloned()
                    .unwrap_or(Val::Null);

                if !self.transformer.is_matching_type(&value) {
                    debug!(
                        directive = %invocation.name,
                        %id,
                        field = output_key,
                        value_type = value.type_name(),
                        "Value does not match the directive's type"
                    );
                    ctx.feedback.push(
                        self.transformer
                            .non_matching_type_feedback(&value, id, field)
                            .for_directive(invocation.name.clone())
                            .for_item(id)
                            .for_field(output_key),
                    );
                    continue;
                }

                let transformed = self.transformer.transform(value, &arguments);

                if let Some(payload) = self.transformer.validate(&transformed, &arguments) {
                    ctx.feedback.push(
                        FeedbackEntry::new(
                            payload.severity,
                            self.transformer.feedback_provider(),
                            payload.code,
                            payload.args,
                        )
                        .for_directive(invocation.name.clone())
                        .for_item(id)
                        .for_field(output_key),
                    );
                }

                ctx.results.set(id, output_key, transformed);
            }
        }
    }
}
