// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{Positioned, types::Field as ParsedField};
use indexmap::IndexMap;
use serde::Serialize;

use crate::ResultItemId;

/// A field of the query, as far as directives are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub alias: Option<String>,
    /// The name of the field.
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn from_parsed(field: &Positioned<ParsedField>) -> Self {
        Self {
            alias: field.node.alias.as_ref().map(|alias| alias.node.to_string()),
            name: field.node.name.node.to_string(),
        }
    }

    /// The key under which the field's value is stored in a result item.
    pub fn output_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFields {
    /// Fields to which the directive applies directly.
    pub direct: Vec<Field>,
}

/// For each item of the batch, the fields a directive application targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveTargets {
    items: IndexMap<ResultItemId, ItemFields>,
}

impl DirectiveTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the same fields on every listed item.
    pub fn uniform<'a>(ids: impl IntoIterator<Item = &'a ResultItemId>, fields: &[Field]) -> Self {
        Self {
            items: ids
                .into_iter()
                .map(|id| {
                    (
                        id.clone(),
                        ItemFields {
                            direct: fields.to_vec(),
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn add(&mut self, id: ResultItemId, field: Field) {
        self.items.entry(id).or_default().direct.push(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultItemId, &ItemFields)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
