// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Extract fields and their directives from a query document.
//!
//! Only the top-level selection of a single operation is considered: that is the shape a
//! pipeline hands to directive resolvers for one batch of items.

use async_graphql_parser::{
    parse_query,
    types::{DocumentOperations, Selection},
};
use thiserror::Error;

use crate::{DirectiveInvocation, Field};

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("{0}")]
    QueryParsingFailed(#[from] async_graphql_parser::Error),

    #[error("Expected exactly one operation, found {0}")]
    MultipleOperations(usize),
}

/// Parse `query` and return each top-level field with the directives applied to it, in order.
pub fn field_directives(
    query: &str,
) -> Result<Vec<(Field, Vec<DirectiveInvocation>)>, BindingError> {
    let document = parse_query(query)?;

    let operation = match &document.operations {
        DocumentOperations::Single(operation) => operation,
        DocumentOperations::Multiple(operations) => {
            return Err(BindingError::MultipleOperations(operations.len()));
        }
    };

    Ok(operation
        .node
        .selection_set
        .node
        .items
        .iter()
        .filter_map(|selection| match &selection.node {
            Selection::Field(field) => Some((
                Field::from_parsed(field),
                field
                    .node
                    .directives
                    .iter()
                    .map(DirectiveInvocation::from_parsed)
                    .collect(),
            )),
            // Fragments are expanded by the pipeline before directives run
            _ => None,
        })
        .collect())
}
