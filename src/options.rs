//! Parsing of per-query option strings.
//!
//! Options arrive as `name=value` pairs or bare flags. `headers` and
//! `format` shape the assembled output; everything else belongs to the
//! tuple enumerator and is forwarded untouched.
use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Array,
    Map,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(Format::Array),
            "map" => Ok(Format::Map),
            other => Err(format!("expected 'array' or 'map', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub headers: bool,
    pub format: Format,
    /// Options passed verbatim to every enumeration call.
    pub forwarded: Vec<String>,
}

fn invalid(option: &str, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidOption { option: option.to_string(), reason: reason.into() }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, QueryError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(invalid(option, format!("expected 'true' or 'false', got '{}'", other))),
    }
}

impl QueryOptions {
    pub fn parse<S: AsRef<str>>(options: &[S]) -> Result<Self, QueryError> {
        let mut parsed = Self::default();
        for raw in options {
            let option = raw.as_ref();
            if option.trim().is_empty() {
                return Err(invalid(option, "empty option"));
            }
            match option.split_once('=') {
                Some(("", _)) => return Err(invalid(option, "missing option name")),
                Some((_, "")) => return Err(invalid(option, "missing option value")),
                Some(("headers", value)) => parsed.headers = parse_bool(option, value)?,
                Some(("format", value)) => {
                    parsed.format = value.parse().map_err(|reason: String| invalid(option, reason))?
                }
                None if option == "headers" => parsed.headers = true,
                None if option == "format" => return Err(invalid(option, "format needs a value")),
                _ => parsed.forwarded.push(option.to_string()),
            }
        }
        Ok(parsed)
    }
}
