// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::HashMap, fmt::Display};

use async_graphql_value::ConstValue;
use serde::de::Error;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum ValNumber {
    I32(i32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ValNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            ValNumber::F32(n) => *n as f64,
            ValNumber::F64(n) => *n,
            ValNumber::I32(n) => *n as f64,
            ValNumber::I64(n) => *n as f64,
            ValNumber::U64(n) => *n as f64,
        }
    }

    /// The integral value, if this number is an integer that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValNumber::I32(n) => Some(*n as i64),
            ValNumber::I64(n) => Some(*n),
            ValNumber::U64(n) => i64::try_from(*n).ok(),
            ValNumber::F32(_) | ValNumber::F64(_) => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ValNumber::F32(_) | ValNumber::F64(_))
    }

    /// Zero of any width. `-0.0` is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            ValNumber::I32(n) => *n == 0,
            ValNumber::I64(n) => *n == 0,
            ValNumber::U64(n) => *n == 0,
            ValNumber::F32(n) => *n == 0.0,
            ValNumber::F64(n) => *n == 0.0,
        }
    }
}

impl Display for ValNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValNumber::I32(n) => write!(f, "{n}"),
            ValNumber::I64(n) => write!(f, "{n}"),
            ValNumber::U64(n) => write!(f, "{n}"),
            ValNumber::F32(n) => write!(f, "{n:?}"),
            ValNumber::F64(n) => write!(f, "{n:?}"),
        }
    }
}

impl TryFrom<ValNumber> for serde_json::Number {
    type Error = ();

    fn try_from(value: ValNumber) -> Result<Self, Self::Error> {
        match value {
            ValNumber::I32(n) => Ok(serde_json::Number::from(n)),
            ValNumber::I64(n) => Ok(serde_json::Number::from(n)),
            ValNumber::U64(n) => Ok(serde_json::Number::from(n)),
            ValNumber::F32(n) => serde_json::Number::from_f64(n as f64).ok_or(()),
            ValNumber::F64(n) => serde_json::Number::from_f64(n).ok_or(()),
        }
    }
}

impl TryFrom<serde_json::Number> for ValNumber {
    type Error = ();

    fn try_from(value: serde_json::Number) -> Result<Self, Self::Error> {
        if let Some(n) = value.as_i64() {
            Ok(ValNumber::I64(n))
        } else if let Some(n) = value.as_u64() {
            Ok(ValNumber::U64(n))
        } else if let Some(n) = value.as_f64() {
            Ok(ValNumber::F64(n))
        } else {
            Err(())
        }
    }
}

impl From<i32> for ValNumber {
    fn from(value: i32) -> Self {
        ValNumber::I32(value)
    }
}

impl From<i64> for ValNumber {
    fn from(value: i64) -> Self {
        ValNumber::I64(value)
    }
}

impl From<u64> for ValNumber {
    fn from(value: u64) -> Self {
        ValNumber::U64(value)
    }
}

impl From<f32> for ValNumber {
    fn from(value: f32) -> Self {
        ValNumber::F32(value)
    }
}

impl From<f64> for ValNumber {
    fn from(value: f64) -> Self {
        ValNumber::F64(value)
    }
}

/// A resolved field value, a directive argument value, or a configured default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Val {
    Bool(bool),
    Number(ValNumber),
    String(String),
    List(Vec<Val>),
    Object(HashMap<String, Val>),
    Binary(bytes::Bytes),
    Enum(String),
    Null,
}

pub const TRUE: Val = Val::Bool(true);
pub const FALSE: Val = Val::Bool(false);

impl Val {
    pub fn get(&self, key: &str) -> Option<&Val> {
        match self {
            Val::Object(o) => o.get(key),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Val::Null)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Val::Number(n) if n.is_float())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Val::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// The string content of a `String` or an `Enum`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::String(s) | Val::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the runtime type, used in feedback messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Bool(_) => "boolean",
            Val::Number(n) if n.is_float() => "float",
            Val::Number(_) => "integer",
            Val::String(_) => "string",
            Val::List(_) => "list",
            Val::Object(_) => "object",
            Val::Binary(_) => "binary",
            Val::Enum(_) => "enum",
            Val::Null => "null",
        }
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Val::Bool(b) => write!(f, "{b}"),
            Val::Number(n) => write!(f, "{n}"),
            Val::String(s) => write_string_literal(f, s),
            Val::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Val::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Val::Binary(_) => write!(f, "Binary"),
            Val::Enum(e) => write!(f, "{e}"),
            Val::Null => write!(f, "null"),
        }
    }
}

/// Writes `s` as a quoted GraphQL string literal.
fn write_string_literal(f: &mut std::fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

impl From<f64> for Val {
    fn from(value: f64) -> Self {
        Val::Number(ValNumber::F64(value))
    }
}

impl From<i64> for Val {
    fn from(value: i64) -> Self {
        Val::Number(ValNumber::I64(value))
    }
}

impl From<bool> for Val {
    fn from(value: bool) -> Self {
        Val::Bool(value)
    }
}

impl From<&str> for Val {
    fn from(value: &str) -> Self {
        Val::String(value.to_string())
    }
}

impl From<String> for Val {
    fn from(value: String) -> Self {
        Val::String(value)
    }
}

impl TryFrom<Val> for serde_json::Value {
    type Error = serde_json::Error;

    fn try_from(value: Val) -> Result<Self, Self::Error> {
        match value {
            Val::Null => Ok(serde_json::Value::Null),
            Val::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Val::Number(n) => {
                Ok(serde_json::Value::Number(n.try_into().map_err(|_| {
                    serde_json::Error::custom(format!("Invalid number {n}"))
                })?))
            }
            Val::String(s) => Ok(serde_json::Value::String(s)),
            Val::List(l) => Ok(serde_json::Value::Array(
                l.into_iter()
                    .map(|v| v.try_into())
                    .collect::<Result<_, _>>()?,
            )),
            Val::Object(o) => Ok(serde_json::Value::Object(
                o.into_iter()
                    .map(|(k, v)| Ok((k, v.try_into()?)))
                    .collect::<Result<_, _>>()?,
            )),
            Val::Enum(e) => Ok(serde_json::Value::String(e)),
            Val::Binary(_) => Err(Error::custom("Binary is not supported")),
        }
    }
}

impl TryFrom<ConstValue> for Val {
    type Error = serde_json::Error;

    fn try_from(value: ConstValue) -> Result<Self, Self::Error> {
        match value {
            ConstValue::Null => Ok(Val::Null),
            ConstValue::Boolean(b) => Ok(Val::Bool(b)),
            ConstValue::Number(n) => {
                Ok(Val::Number(n.try_into().map_err(|_| {
                    serde_json::Error::custom("Invalid number")
                })?))
            }
            ConstValue::String(s) => Ok(Val::String(s)),
            ConstValue::List(l) => Ok(Val::List(
                l.into_iter()
                    .map(|v| v.try_into())
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Object(o) => Ok(Val::Object(
                o.into_iter()
                    .map(|(k, v)| Ok((k.to_string(), v.try_into()?)))
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Binary(b) => Ok(Val::Binary(b)),
            ConstValue::Enum(e) => Ok(Val::Enum(e.to_string())),
        }
    }
}

impl From<serde_json::Value> for Val {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Val::Null,
            serde_json::Value::Bool(b) => Val::Bool(b),
            serde_json::Value::Number(n) => ValNumber::try_from(n)
                .map(Val::Number)
                .unwrap_or(Val::Null),
            serde_json::Value::String(s) => Val::String(s),
            serde_json::Value::Array(l) => Val::List(l.into_iter().map(|v| v.into()).collect()),
            serde_json::Value::Object(o) => Val::Object(
                o.into_iter()
                    .map(|(k, v)| (k, v.into()))
                    .collect::<HashMap<_, _>>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_floats_stay_floats() {
        assert!(Val::from(json!(0.0)).is_float());
        assert!(Val::from(json!(-2.5)).is_float());
        assert!(!Val::from(json!(2)).is_float());
        assert!(!Val::from(json!("2.5")).is_float());
        assert!(!Val::Null.is_float());
    }

    #[test]
    fn zero_of_any_width() {
        for zero in [
            ValNumber::I32(0),
            ValNumber::I64(0),
            ValNumber::U64(0),
            ValNumber::F32(0.0),
            ValNumber::F64(-0.0),
        ] {
            assert!(zero.is_zero(), "{zero:?}");
        }
        assert!(!ValNumber::F64(0.001).is_zero());
    }

    #[test]
    fn json_round_trip_of_nested_values() {
        let value = json!({"tags": ["a", "b"], "price": 1.5, "stock": 3, "active": true});
        let back: serde_json::Value = Val::from(value.clone()).try_into().unwrap();

        assert_eq!(back, value);
    }

    #[test]
    fn display_renders_graphql_literals() {
        assert_eq!(Val::from("N/A").to_string(), "\"N/A\"");
        assert_eq!(Val::from(r#"a"b\c"#).to_string(), r#""a\"b\\c""#);
        assert_eq!(Val::from("line\nnext").to_string(), r#""line\nnext""#);
        assert_eq!(Val::from(1.0).to_string(), "1.0");
        assert_eq!(Val::Enum("IS_NULL".into()).to_string(), "IS_NULL");
        assert_eq!(Val::List(vec![Val::from(1i64), Val::Null]).to_string(), "[1, null]");
    }

    #[test]
    fn const_value_conversion() {
        let value = ConstValue::List(vec![
            ConstValue::Enum(async_graphql_value::Name::new("IS_EMPTY")),
            ConstValue::Null,
        ]);

        assert_eq!(
            Val::try_from(value).unwrap(),
            Val::List(vec![Val::Enum("IS_EMPTY".into()), Val::Null])
        );
    }

    #[test]
    fn non_finite_floats_are_not_json() {
        let result: Result<serde_json::Value, _> = Val::from(f64::NAN).try_into();
        assert!(result.is_err());
    }
}
