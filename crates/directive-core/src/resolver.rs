// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::debug;

use crate::{
    DirectiveInvocation, DirectiveTargets, ExecutionContext, FeedbackEntry, ResultItemId,
    Severity, ValidatedArguments,
    feedback::CoreFeedbackProvider,
    schema::{DirectiveArgumentDefinition, DirectiveDefinition, ScalarType},
    validation::ArgumentValidator,
};

/// The runtime behavior of one directive.
///
/// A resolver holds only what it was configured with at construction; everything that
/// varies per pass arrives through the [`ExecutionContext`]. This lets one instance serve
/// concurrent passes over independent batches.
pub trait DirectiveResolver: std::fmt::Debug + Send + Sync {
    fn directive_name(&self) -> &str;

    fn description(&self) -> Option<String> {
        None
    }

    fn argument_definitions(&self) -> Vec<DirectiveArgumentDefinition> {
        vec![]
    }

    /// The field types this directive may be attached to. `None` allows any type.
    fn supported_field_types(&self) -> Option<Vec<ScalarType>> {
        None
    }

    fn definition(&self) -> DirectiveDefinition {
        DirectiveDefinition {
            name: self.directive_name().to_string(),
            description: self.description(),
            arguments: self.argument_definitions(),
            supported_field_types: self.supported_field_types(),
        }
    }

    /// Apply the directive to every targeted (item, field) pair.
    ///
    /// Must not add or remove items or fields, and must not stop at the first failing pair:
    /// problems are recorded in `ctx.feedback`.
    fn resolve_directive(
        &self,
        invocation: &DirectiveInvocation,
        targets: &DirectiveTargets,
        ctx: &mut ExecutionContext,
    );
}

/// Validate `invocation`'s arguments for the item `id`.
///
/// On failure, records a single error for the item and returns `None`; callers skip the item.
pub fn validate_directive_for_item(
    definitions: &[DirectiveArgumentDefinition],
    invocation: &DirectiveInvocation,
    id: &ResultItemId,
    ctx: &mut ExecutionContext,
) -> Option<ValidatedArguments> {
    let validation = ArgumentValidator::new(
        &invocation.name,
        definitions,
        &ctx.variables,
        ctx.item_expressions.get(id),
    )
    .validate(&invocation.arguments);

    match validation {
        Ok(arguments) => Some(arguments),
        Err(error) => {
            debug!(directive = %invocation.name, %id, %error, "Skipping item with invalid directive arguments");
            ctx.feedback.push(
                FeedbackEntry::new(
                    Severity::Error,
                    &CoreFeedbackProvider,
                    CoreFeedbackProvider::E1,
                    vec![invocation.name.clone(), id.to_string(), error.to_string()],
                )
                .for_directive(invocation.name.clone())
                .for_item(id),
            );
            None
        }
    }
}
