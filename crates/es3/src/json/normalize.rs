//! Parsing recovered JSON and stripping .NET type wrappers.
//!
//! The save serializer wraps typed values as
//! `{"__type": "<CLR type>", "value": <payload>}`. Normalisation replaces every
//! such wrapper with its payload, recursively, so the output is plain JSON.
//! Key order is preserved throughout.

use std::borrow::Cow;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::scanner::{first_object_end, replace_lone_surrogates};
use super::JsonError;

/// Key holding the CLR type name of a wrapper.
pub const TYPE_KEY: &str = "__type";

/// Key holding the payload of a wrapper.
pub const VALUE_KEY: &str = "value";

/// What to do with a `__type` wrapper that carries no `value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrapperPolicy {
    /// Replace the wrapper with `null`.
    #[default]
    CollapseToNull,
    /// Leave the wrapper object exactly as it was parsed.
    Keep,
}

/// A wrapper policy name other than `null` or `keep`.
#[derive(Debug, Error)]
#[error("unknown wrapper policy {0:?}: expected \"null\" or \"keep\"")]
pub struct UnknownPolicy(pub String);

impl FromStr for WrapperPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Self::CollapseToNull),
            "keep" => Ok(Self::Keep),
            _ => Err(UnknownPolicy(s.to_owned())),
        }
    }
}

/// Parses recovered JSON and resolves .NET type wrappers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: WrapperPolicy,
}

impl Normalizer {
    pub fn new(policy: WrapperPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> WrapperPolicy {
        self.policy
    }

    /// Parse `data` as a JSON object and return it normalised, as compact JSON.
    ///
    /// Invalid UTF-8 and unpaired surrogate escapes become U+FFFD instead of
    /// failing the parse.
    ///
    /// If `data` does not parse directly, the first balanced object (counted
    /// string-aware from the start of `data`) is parsed instead. Each field of
    /// the root object is normalised; the root itself is never unwrapped.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Parse`] if neither attempt yields a JSON object.
    pub fn normalize(&self, data: &[u8]) -> Result<String, JsonError> {
        let text = String::from_utf8_lossy(data);
        let lossy = matches!(text, Cow::Owned(_));
        let text = replace_lone_surrogates(&text);
        if lossy || matches!(text, Cow::Owned(_)) {
            debug!("invalid string content replaced with U+FFFD");
        }

        let root = parse_object(&text)?;
        let normalized: Map<String, Value> = root
            .into_iter()
            .map(|(key, value)| (key, self.normalize_value(value)))
            .collect();
        Ok(Value::Object(normalized).to_string())
    }

    /// Recursively replace every type wrapper inside `value` with its payload.
    pub fn normalize_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => self.normalize_object(map),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.normalize_value(item))
                    .collect(),
            ),
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => scalar,
        }
    }

    fn normalize_object(&self, mut map: Map<String, Value>) -> Value {
        let type_name = match map.get(TYPE_KEY) {
            Some(Value::String(name)) => name.clone(),
            _ => {
                return Value::Object(
                    map.into_iter()
                        .map(|(key, value)| (key, self.normalize_value(value)))
                        .collect(),
                )
            }
        };

        // Primitive and dictionary wrappers alike keep their payload under
        // `value`; a dictionary payload is an object and recurses entry-wise.
        match map.remove(VALUE_KEY) {
            Some(payload) => self.normalize_value(payload),
            None => match self.policy {
                WrapperPolicy::CollapseToNull => {
                    warn!(type_name = %type_name, "wrapper without value collapsed to null");
                    Value::Null
                }
                WrapperPolicy::Keep => Value::Object(map),
            },
        }
    }
}

/// Normalise `data` with the default [`WrapperPolicy`].
///
/// # Errors
///
/// See [`Normalizer::normalize`].
pub fn normalize(data: &[u8]) -> Result<String, JsonError> {
    Normalizer::default().normalize(data)
}

fn parse_object(data: &str) -> Result<Map<String, Value>, JsonError> {
    match serde_json::from_str(data) {
        Ok(root) => Ok(root),
        Err(err) => {
            let end = first_object_end(data.as_bytes()).unwrap_or(data.len());
            warn!(
                error = %err,
                input_len = data.len(),
                recovered_len = end,
                "JSON parse failed; retrying on first balanced object"
            );
            Ok(serde_json::from_str(&data[..end])?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(data: &str) -> String {
        normalize(data.as_bytes()).unwrap()
    }

    #[test]
    fn unwraps_scalar_wrapper() {
        assert_eq!(
            norm(r#"{"k":{"__type":"System.String","value":"hi"}}"#),
            r#"{"k":"hi"}"#
        );
    }

    #[test]
    fn unwraps_dictionary_wrapper() {
        let input = concat!(
            r#"{"d":{"__type":"System.Collections.Generic.Dictionary`2"#,
            r#"[[System.String, mscorlib],[System.Int32, mscorlib]],mscorlib","#,
            r#""value":{"a":1,"b":2}}}"#
        );
        assert_eq!(norm(input), r#"{"d":{"a":1,"b":2}}"#);
    }

    #[test]
    fn unrecognized_wrapper_collapses_to_null() {
        assert_eq!(
            norm(r#"{"x":{"__type":"UnityEngine.Vector3","y":2}}"#),
            r#"{"x":null}"#
        );
    }

    #[test]
    fn keep_policy_leaves_unrecognized_wrapper() {
        let n = Normalizer::new(WrapperPolicy::Keep);
        let input = concat!(
            r#"{"x":{"__type":"UnityEngine.Vector3","y":2,"#,
            r#""z":{"__type":"int","value":3}}}"#
        );
        let out = n.normalize(input.as_bytes()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn nested_wrappers_resolve() {
        let input = concat!(
            r#"{"outer":{"__type":"Dictionary","value":{"p1":{"__type":"int","value":7},"#,
            r#""p2":[{"__type":"bool","value":true},null]}}}"#
        );
        assert_eq!(norm(input), r#"{"outer":{"p1":7,"p2":[true,null]}}"#);
    }

    #[test]
    fn wrapper_whose_value_is_a_wrapper() {
        let input = r#"{"w":{"__type":"A","value":{"__type":"B","value":[1,2]}}}"#;
        assert_eq!(norm(input), r#"{"w":[1,2]}"#);
    }

    #[test]
    fn non_string_type_is_a_plain_object() {
        let input = r#"{"o":{"__type":5,"value":{"__type":"int","value":1}}}"#;
        assert_eq!(norm(input), r#"{"o":{"__type":5,"value":1}}"#);
    }

    #[test]
    fn root_is_not_unwrapped() {
        let input = r#"{"__type":"Root","value":{"__type":"int","value":4}}"#;
        assert_eq!(norm(input), r#"{"__type":"Root","value":4}"#);
    }

    #[test]
    fn key_order_preserved() {
        let input = r#"{"zeta":1,"alpha":{"__type":"X","value":{"y":1,"b":2}},"mid":[]}"#;
        assert_eq!(norm(input), r#"{"zeta":1,"alpha":{"y":1,"b":2},"mid":[]}"#);
    }

    #[test]
    fn scalars_unchanged() {
        let n = Normalizer::default();
        for v in [json!(null), json!(true), json!(1.5), json!("s"), json!(76561198000000001u64)] {
            assert_eq!(n.normalize_value(v.clone()), v);
        }
    }

    #[test]
    fn large_integers_survive() {
        assert_eq!(
            norm(r#"{"id":{"__type":"long","value":76561198000000001}}"#),
            r#"{"id":76561198000000001}"#
        );
    }

    #[test]
    fn recovers_from_trailing_garbage() {
        assert_eq!(norm("{\"a\":\"}\"} and then {junk"), r#"{"a":"}"}"#);
    }

    #[test]
    fn invalid_utf8_becomes_replacement_char() {
        assert_eq!(
            normalize(b"{\"name\":\"Semi\xffbot\",\"n\":1}").unwrap(),
            "{\"name\":\"Semi\u{fffd}bot\",\"n\":1}"
        );
    }

    #[test]
    fn lone_surrogate_becomes_replacement_char() {
        assert_eq!(
            norm(r#"{"name":"ab\ud83d","n":{"__type":"int","value":1}}"#),
            "{\"name\":\"ab\u{fffd}\",\"n\":1}"
        );
    }

    #[test]
    fn surrogate_pair_decodes() {
        assert_eq!(norm(r#"{"name":"\ud83d\ude00"}"#), "{\"name\":\"\u{1f600}\"}");
    }

    #[test]
    fn fails_when_recovery_fails() {
        assert!(matches!(normalize(b"{\"a\":"), Err(JsonError::Parse(_))));
        assert!(matches!(normalize(b"garbage {\"a\":1}"), Err(JsonError::Parse(_))));
    }

    #[test]
    fn root_must_be_an_object() {
        assert!(normalize(b"[1,2,3]").is_err());
        assert!(normalize(b"42").is_err());
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("null".parse::<WrapperPolicy>().unwrap(), WrapperPolicy::CollapseToNull);
        assert_eq!(" Keep ".parse::<WrapperPolicy>().unwrap(), WrapperPolicy::Keep);
        assert!("drop".parse::<WrapperPolicy>().is_err());
    }
}
