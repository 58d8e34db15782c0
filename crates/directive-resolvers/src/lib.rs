// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Field-value directives: typed transforms (`@abs`, `@round`, ...) and default-value
//! injection (`@default`).

pub mod builtins;
pub mod default_value;
pub mod feedback;
pub mod float_transform;
pub mod typed_transform;

pub use builtins::{RegistrationError, register_builtins};
pub use default_value::{Condition, ConfigError, DefaultValueConfig, DefaultValueDirective};
pub use float_transform::{FloatFieldValueTransformer, FloatTransform};
pub use typed_transform::{TypedFieldValueDirective, TypedFieldValueTransformer, ValidationPayload};
