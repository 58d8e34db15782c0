// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The contract between a query-execution pipeline and the directive resolvers plugged into it.
//!
//! A pass over a batch of result items works on a single [`ExecutionContext`]: the
//! resolved values of every item, the variables available to directive arguments, and the
//! feedback log that collects errors, warnings and deprecations. Resolvers never fail a pass;
//! anything that goes wrong for an (item, field) pair is recorded as a [`FeedbackEntry`].

pub mod binding;
pub mod feedback;
pub mod schema;
pub mod validation;

mod context;
mod field;
mod invocation;
mod item;
mod pipeline;
mod registry;
mod resolver;

pub use context::ExecutionContext;
pub use feedback::{FeedbackEntry, FeedbackLog, FeedbackProvider, Severity};
pub use field::{DirectiveTargets, Field, ItemFields};
pub use invocation::DirectiveInvocation;
pub use item::{ResultItem, ResultItemId, ResultStore, ResultStoreError};
pub use pipeline::{DirectiveApplication, DirectivePipeline};
pub use registry::{DirectiveRegistry, SchemaError};
pub use resolver::{DirectiveResolver, validate_directive_for_item};
pub use validation::ValidatedArguments;
