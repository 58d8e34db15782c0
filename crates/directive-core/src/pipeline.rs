// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::{info_span, instrument, warn};

use crate::{
    DirectiveInvocation, DirectiveRegistry, DirectiveTargets, ExecutionContext, FeedbackEntry,
    Severity, feedback::CoreFeedbackProvider,
};

/// One directive, as written on a field, together with the items and fields it applies to.
#[derive(Debug, Clone)]
pub struct DirectiveApplication {
    pub invocation: DirectiveInvocation,
    pub targets: DirectiveTargets,
}

/// The directive stage of a query-execution pass.
#[derive(Debug, Clone)]
pub struct DirectivePipeline {
    registry: DirectiveRegistry,
}

impl DirectivePipeline {
    pub fn new(registry: DirectiveRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Run each application in order. Directives without a registered resolver are
    /// reported and skipped.
    #[instrument(skip_all, fields(applications = applications.len()))]
    pub fn execute(&self, applications: &[DirectiveApplication], ctx: &mut ExecutionContext) {
        for application in applications {
            let name = application.invocation.name.as_str();

            match self.registry.get(name) {
                Some(resolver) => {
                    let _span = info_span!(
                        "directive",
                        directive = name,
                        items = application.targets.len()
                    )
                    .entered();
                    resolver.resolve_directive(
                        &application.invocation,
                        &application.targets,
                        ctx,
                    );
                }
                None => {
                    warn!(directive = name, "No resolver registered for directive");
                    ctx.feedback.push(
                        FeedbackEntry::new(
                            Severity::Error,
                            &CoreFeedbackProvider,
                            CoreFeedbackProvider::E2,
                            vec![name.to_string()],
                        )
                        .for_directive(name),
                    );
                }
            }
        }
    }
}
