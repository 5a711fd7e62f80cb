use std::sync::LazyLock;
use percent_encoding::percent_decode_str;
use regex::Regex;
use crate::types::{Operation, Route};

static VALID_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("path pattern compiles")
});

/// Matches request paths of the form `/{view|edit|save}/{Title}`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathValidator;

impl PathValidator {
    pub fn new() -> Self {
        Self
    }

    /// Extract the operation and title, or `None` if the path is not a wiki route.
    ///
    /// `path` is percent-decoded before matching, so `/view/%54est` is `Test`
    /// while an encoded `/` or `.` still fails the alphanumeric title rule.
    pub fn validate(&self, path: &str) -> Option<Route> {
        let decoded = percent_decode_str(path).decode_utf8().ok()?;
        let caps = VALID_PATH.captures(&decoded)?;
        let operation = match &caps[1] {
            "view" => Operation::View,
            "edit" => Operation::Edit,
            "save" => Operation::Save,
            _ => return None,
        };
        Some(Route { operation, title: caps[2].to_string() })
    }
}
