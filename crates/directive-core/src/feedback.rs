// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use serde::Serialize;

use crate::ResultItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Deprecation,
}

/// A source of feedback codes and the message templates behind them.
///
/// Templates use positional placeholders (`{0}`, `{1}`, ...) filled from the entry's arguments.
pub trait FeedbackProvider {
    fn name(&self) -> &'static str;

    fn message_template(&self, code: &str) -> Option<&'static str>;

    fn render(&self, code: &str, args: &[String]) -> String {
        match self.message_template(code) {
            Some(template) => interpolate(template, args),
            None => format!("[{}:{code}] {}", self.name(), args.join(", ")),
        }
    }
}

/// Replace each `{N}` token of `template` with `args[N]`, in one pass over the template.
/// Argument text is copied verbatim; tokens without a matching argument are kept as is.
fn interpolate(template: &str, args: &[String]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        message.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];

        let arg = after_brace.find('}').and_then(|end| {
            let index = &after_brace[..end];
            if !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let arg = args.get(index.parse::<usize>().ok()?)?;
            Some((arg, end))
        });

        match arg {
            Some((arg, end)) => {
                message.push_str(arg);
                rest = &after_brace[end + 1..];
            }
            None => {
                message.push('{');
                rest = after_brace;
            }
        }
    }
    message.push_str(rest);

    message
}

/// A structured error, warning or deprecation recorded during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackEntry {
    pub severity: Severity,
    pub provider: &'static str,
    pub code: &'static str,
    pub args: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ResultItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl FeedbackEntry {
    pub fn new(
        severity: Severity,
        provider: &dyn FeedbackProvider,
        code: &'static str,
        args: Vec<String>,
    ) -> Self {
        let message = provider.render(code, &args);

        Self {
            severity,
            provider: provider.name(),
            code,
            args,
            message,
            directive: None,
            item_id: None,
            field: None,
        }
    }

    pub fn for_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    pub fn for_item(mut self, item_id: &ResultItemId) -> Self {
        self.item_id = Some(item_id.clone());
        self
    }

    pub fn for_field(mut self, field_output_key: impl Into<String>) -> Self {
        self.field = Some(field_output_key.into());
        self
    }
}

impl Display for FeedbackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.provider, self.code, self.message)
    }
}

/// Per-pass feedback, split by severity. Entries are only ever appended.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FeedbackLog {
    pub errors: Vec<FeedbackEntry>,
    pub warnings: Vec<FeedbackEntry>,
    pub deprecations: Vec<FeedbackEntry>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FeedbackEntry) {
        match entry.severity {
            Severity::Error => self.errors.push(entry),
            Severity::Warning => self.warnings.push(entry),
            Severity::Deprecation => self.deprecations.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.deprecations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.deprecations.iter())
    }
}

/// Feedback raised by the pipeline itself rather than by a particular resolver.
pub struct CoreFeedbackProvider;

impl CoreFeedbackProvider {
    pub const E1: &'static str = "e1";
    pub const E2: &'static str = "e2";
}

impl FeedbackProvider for CoreFeedbackProvider {
    fn name(&self) -> &'static str {
        "directive-core"
    }

    fn message_template(&self, code: &str) -> Option<&'static str> {
        match code {
            Self::E1 => Some("Directive '@{0}' is invalid for object with ID '{1}': {2}"),
            Self::E2 => Some("No directive resolver is registered under name '@{0}'"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_positional_placeholders() {
        let entry = FeedbackEntry::new(
            Severity::Error,
            &CoreFeedbackProvider,
            CoreFeedbackProvider::E1,
            vec!["round".into(), "7".into(), "oops".into()],
        );

        assert_eq!(
            entry.message,
            "Directive '@round' is invalid for object with ID '7': oops"
        );
        assert_eq!(entry.to_string(), format!("[directive-core:e1] {}", entry.message));
    }

    #[test]
    fn arguments_are_not_interpolated_again() {
        assert_eq!(
            CoreFeedbackProvider.render("e1", &["{1}".into(), "{2}".into(), "{0}".into()]),
            "Directive '@{1}' is invalid for object with ID '{2}': {0}"
        );
    }

    #[test]
    fn unmatched_placeholders_are_kept() {
        assert_eq!(
            interpolate("{0} of {1} {x} {", &["one".into()]),
            "one of {1} {x} {"
        );
    }

    #[test]
    fn unknown_code_still_renders() {
        assert_eq!(
            CoreFeedbackProvider.render("e99", &["a".into(), "b".into()]),
            "[directive-core:e99] a, b"
        );
    }

    #[test]
    fn log_routes_by_severity() {
        let mut log = FeedbackLog::new();
        for severity in [Severity::Warning, Severity::Error, Severity::Deprecation, Severity::Error] {
            log.push(FeedbackEntry::new(
                severity,
                &CoreFeedbackProvider,
                CoreFeedbackProvider::E2,
                vec!["x".into()],
            ));
        }

        assert_eq!(log.errors.len(), 2);
        assert_eq!(log.warnings.len(), 1);
        assert_eq!(log.deprecations.len(), 1);
        assert_eq!(log.len(), 4);
        assert_eq!(log.iter().next().map(|e| e.severity), Some(Severity::Error));
    }

    #[test]
    fn serializes_without_empty_context() {
        let entry = FeedbackEntry::new(
            Severity::Warning,
            &CoreFeedbackProvider,
            CoreFeedbackProvider::E2,
            vec!["nope".into()],
        )
        .for_item(&ResultItemId::Int(3));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["item_id"], 3);
        assert!(json.get("field").is_none());
    }
}
