// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use common::value::Val;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultItemId {
    Int(i64),
    String(String),
}

impl Display for ResultItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultItemId::Int(id) => write!(f, "{id}"),
            ResultItemId::String(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ResultItemId {
    fn from(id: i64) -> Self {
        ResultItemId::Int(id)
    }
}

impl From<&str> for ResultItemId {
    fn from(id: &str) -> Self {
        ResultItemId::String(id.to_string())
    }
}

/// The resolved values of one object, keyed by field output key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultItem {
    values: IndexMap<String, Val>,
}

impl ResultItem {
    pub fn new(values: IndexMap<String, Val>) -> Self {
        Self { values }
    }

    pub fn get(&self, output_key: &str) -> Option<&Val> {
        self.values.get(output_key)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Val)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Error, Debug)]
pub enum ResultStoreError {
    #[error("Expected an array of result objects")]
    NotAnArray,

    #[error("Result at index {0} is not an object")]
    NotAnObject(usize),

    #[error("Result at index {0} has no usable 'id' (expected an integer or a string)")]
    InvalidId(usize),

    #[error("Duplicate result ID '{0}'")]
    DuplicateId(ResultItemId),
}

/// The resolved values of every item in the batch, in insertion order.
///
/// Directive resolvers may only overwrite existing `(item, field)` values: the shape of the
/// batch (which items exist, which fields they carry) is owned by the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    items: IndexMap<ResultItemId, ResultItem>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an array of JSON objects, each carrying an `id`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ResultStoreError> {
        let serde_json::Value::Array(objects) = value else {
            return Err(ResultStoreError::NotAnArray);
        };

        let mut store = Self::new();
        for (index, object) in objects.into_iter().enumerate() {
            let serde_json::Value::Object(object) = object else {
                return Err(ResultStoreError::NotAnObject(index));
            };
            let id = match object.get("id") {
                Some(serde_json::Value::Number(n)) => {
                    n.as_i64().map(ResultItemId::Int).ok_or(ResultStoreError::InvalidId(index))?
                }
                Some(serde_json::Value::String(s)) => ResultItemId::String(s.clone()),
                _ => return Err(ResultStoreError::InvalidId(index)),
            };
            if store.items.contains_key(&id) {
                return Err(ResultStoreError::DuplicateId(id));
            }
            let values = object.into_iter().map(|(k, v)| (k, v.into())).collect();
            store.insert(id, ResultItem::new(values));
        }

        Ok(store)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.items
            .values()
            .map(|item| {
                item.values
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.clone().try_into()?)))
                    .collect::<Result<serde_json::Map<_, _>, serde_json::Error>>()
                    .map(serde_json::Value::Object)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)
    }

    pub fn insert(&mut self, id: ResultItemId, item: ResultItem) {
        self.items.insert(id, item);
    }

    pub fn item(&self, id: &ResultItemId) -> Option<&ResultItem> {
        self.items.get(id)
    }

    pub fn get(&self, id: &ResultItemId, output_key: &str) -> Option<&Val> {
        self.items.get(id).and_then(|item| item.get(output_key))
    }

    /// Overwrite the value stored for `(id, output_key)`. Returns `false` (and stores nothing)
    /// if the item or the field does not exist.
    pub fn set(&mut self, id: &ResultItemId, output_key: &str, value: Val) -> bool {
        match self
            .items
            .get_mut(id)
            .and_then(|item| item.values.get_mut(output_key))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &ResultItemId> {
        self.items.keys()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
