// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The schema-visible shape of a directive: the field types it may be attached to and the
//! arguments it accepts. Used at registration time only.

use std::fmt::Display;

use common::value::Val;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
    #[serde(rename = "ID")]
    Id,
    Numeric,
    AnyBuiltInScalar,
    Mixed,
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::String => "String",
            ScalarType::Boolean => "Boolean",
            ScalarType::Id => "ID",
            ScalarType::Numeric => "Numeric",
            ScalarType::AnyBuiltInScalar => "AnyBuiltInScalar",
            ScalarType::Mixed => "Mixed",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArgumentType {
    Scalar(ScalarType),
    Enum { name: String, values: Vec<String> },
    List(Box<ArgumentType>),
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentType::Scalar(scalar) => write!(f, "{scalar}"),
            ArgumentType::Enum { name, .. } => write!(f, "{name}"),
            ArgumentType::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveArgumentDefinition {
    pub name: String,
    pub ty: ArgumentType,
    pub description: Option<String>,
    pub mandatory: bool,
    pub default_value: Option<Val>,
}

impl DirectiveArgumentDefinition {
    pub fn new(name: impl Into<String>, ty: ArgumentType) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            mandatory: false,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_default(mut self, default_value: Val) -> Self {
        self.default_value = Some(default_value);
        self
    }

    fn to_sdl(&self) -> String {
        let mut sdl = format!("{}: {}", self.name, self.ty);
        if self.mandatory {
            sdl.push('!');
        }
        if let Some(default_value) = &self.default_value {
            sdl.push_str(&format!(" = {default_value}"));
        }
        sdl
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<DirectiveArgumentDefinition>,
    /// `None` means the directive may be attached to a field of any type.
    pub supported_field_types: Option<Vec<ScalarType>>,
}

impl DirectiveDefinition {
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();
        if let Some(description) = &self.description {
            sdl.push_str(&format!("\"\"\"{description}\"\"\"\n"));
        }
        sdl.push_str(&format!("directive @{}", self.name));
        if !self.arguments.is_empty() {
            let arguments = self
                .arguments
                .iter()
                .map(DirectiveArgumentDefinition::to_sdl)
                .collect::<Vec<_>>();
            sdl.push_str(&format!("({})", arguments.join(", ")));
        }
        sdl.push_str(" on FIELD");
        sdl
    }
}
