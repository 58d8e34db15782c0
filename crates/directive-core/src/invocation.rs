// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{Pos, Positioned, types::Directive};
use async_graphql_value::Value;
use indexmap::IndexMap;

/// A directive as written in the query: its name and unvalidated arguments.
///
/// Arguments may reference variables; they are resolved (and validated) separately for each
/// result item, since per-item expressions can shadow the query's variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveInvocation {
    pub name: String,
    pub arguments: IndexMap<String, Value>,
    pub pos: Pos,
}

impl DirectiveInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
            pos: Pos::default(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn from_parsed(directive: &Positioned<Directive>) -> Self {
        Self {
            name: directive.node.name.node.to_string(),
            arguments: directive
                .node
                .arguments
                .iter()
                .map(|(name, value)| (name.node.to_string(), value.node.clone()))
                .collect(),
            pos: directive.pos,
        }
    }
}
