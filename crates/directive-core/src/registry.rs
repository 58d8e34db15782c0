// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    DirectiveResolver,
    schema::{DirectiveDefinition, ScalarType},
};

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("A directive named '@{0}' is already registered")]
    DuplicateDirective(String),

    #[error("Unknown directive '@{0}'")]
    UnknownDirective(String),

    #[error("Directive '@{directive}' cannot be applied to fields of type '{field_type}'")]
    UnsupportedFieldType {
        directive: String,
        field_type: ScalarType,
    },
}

/// Directive resolvers available to a pipeline, by directive name.
#[derive(Debug, Default, Clone)]
pub struct DirectiveRegistry {
    resolvers: IndexMap<String, Arc<dyn DirectiveResolver>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resolver: Arc<dyn DirectiveResolver>) -> Result<(), SchemaError> {
        let name = resolver.directive_name().to_string();
        if self.resolvers.contains_key(&name) {
            return Err(SchemaError::DuplicateDirective(name));
        }
        self.resolvers.insert(name, resolver);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DirectiveResolver>> {
        self.resolvers.get(name)
    }

    pub fn definitions(&self) -> Vec<DirectiveDefinition> {
        self.resolvers
            .values()
            .map(|resolver| resolver.definition())
            .collect()
    }

    /// Static check that `directive` may be attached to a field of `field_type`.
    pub fn check_field_compatibility(
        &self,
        directive: &str,
        field_type: ScalarType,
    ) -> Result<(), SchemaError> {
        let resolver = self
            .get(directive)
            .ok_or_else(|| SchemaError::UnknownDirective(directive.to_string()))?;

        match resolver.supported_field_types() {
            Some(supported) if !supported.contains(&field_type) => {
                Err(SchemaError::UnsupportedFieldType {
                    directive: directive.to_string(),
                    field_type,
                })
            }
            _ => Ok(()),
        }
    }
}
