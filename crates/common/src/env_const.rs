// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use directive_env::{EnvError, Environment};

pub const DC_LOG: &str = "DC_LOG";

pub const DC_DEFAULT_VALUE: &str = "DC_DEFAULT_VALUE"; // JSON, e.g. "\"N/A\"" or 0
pub const DC_DEFAULT_CONDITION: &str = "DC_DEFAULT_CONDITION"; // "IS_NULL" (default) or "IS_EMPTY"
pub const DC_EMPTY_INCLUDES_ZERO_STRING: &str = "DC_EMPTY_INCLUDES_ZERO_STRING";

pub fn get_default_value(env: &dyn Environment) -> Result<Option<serde_json::Value>, EnvError> {
    env.get_json(DC_DEFAULT_VALUE)
}

/// The configured default condition name, normalized to upper case.
pub fn get_default_condition(env: &dyn Environment) -> Result<Option<String>, EnvError> {
    match env.get(DC_DEFAULT_CONDITION) {
        None => Ok(None),
        Some(value) => match value.to_uppercase().as_str() {
            condition @ ("IS_NULL" | "IS_EMPTY") => Ok(Some(condition.to_string())),
            _ => Err(EnvError::InvalidEnum {
                env_key: DC_DEFAULT_CONDITION,
                env_value: value,
                message: "Must be one of 'IS_NULL' or 'IS_EMPTY'".to_string(),
            }),
        },
    }
}

pub fn get_empty_includes_zero_string(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(DC_EMPTY_INCLUDES_ZERO_STRING, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use directive_env::MapEnvironment;
    use test_log::test;

    #[test]
    fn default_condition_is_case_insensitive() {
        let env = MapEnvironment::from([(DC_DEFAULT_CONDITION, "is_empty")]);
        assert_eq!(
            get_default_condition(&env).unwrap().as_deref(),
            Some("IS_EMPTY")
        );
        assert_eq!(get_default_condition(&MapEnvironment::new()).unwrap(), None);
    }

    #[test]
    fn unknown_default_condition_is_rejected() {
        let env = MapEnvironment::from([(DC_DEFAULT_CONDITION, "IS_BLANK")]);
        assert!(matches!(
            get_default_condition(&env),
            Err(EnvError::InvalidEnum {
                env_key: DC_DEFAULT_CONDITION,
                ..
            })
        ));
    }

    #[test]
    fn zero_string_counts_as_empty_unless_disabled() {
        assert!(get_empty_includes_zero_string(&MapEnvironment::new()).unwrap());
        assert!(
            !get_empty_includes_zero_string(&MapEnvironment::from([(
                DC_EMPTY_INCLUDES_ZERO_STRING,
                "false"
            )]))
            .unwrap()
        );
    }
}
