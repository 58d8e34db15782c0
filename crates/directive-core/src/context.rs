// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use common::value::Val;

use crate::{FeedbackLog, ResultItemId, ResultStore};

/// Everything a directive stage reads and writes during one query-execution pass.
///
/// The pipeline owns the context for the duration of the pass and lends it to each
/// resolver in turn.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    pub results: ResultStore,
    pub variables: HashMap<String, Val>,
    /// Values that shadow `variables` for a single item (e.g. expressions computed from it).
    pub item_expressions: HashMap<ResultItemId, HashMap<String, Val>>,
    pub feedback: FeedbackLog,
}

impl ExecutionContext {
    pub fn new(results: ResultStore) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: Val) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn with_item_expression(
        mut self,
        id: ResultItemId,
        name: impl Into<String>,
        value: Val,
    ) -> Self {
        self.item_expressions
            .entry(id)
            .or_default()
            .insert(name.into(), value);
        self
    }
}
