//! JSON body extractor that answers malformed input with the standard error body,
//! plus field deserializers that take any JSON scalar where text is expected.

use super::form::{is_falsy_value, scalar_text};
use crate::error::AppError;
use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Any scalar as text; arrays and objects become `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Like [`lenient_text`], but falsy values (`""`, `0`, `false`, null) are `None` too.
pub fn present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy_value(Some(&value)) {
        return Ok(None);
    }
    Ok(scalar_text(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Body {
        #[serde(deserialize_with = "lenient_text")]
        value: Option<String>,
        #[serde(deserialize_with = "present_text")]
        contact: Option<String>,
    }

    fn body(v: Value) -> Body {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn numbers_become_text() {
        let b = body(json!({ "value": 1234567890, "contact": 1234567890 }));
        assert_eq!(b.value.as_deref(), Some("1234567890"));
        assert_eq!(b.contact.as_deref(), Some("1234567890"));
    }

    #[test]
    fn falsy_and_structured_values_are_absent() {
        let b = body(json!({ "value": 0, "contact": 0 }));
        assert_eq!(b.value.as_deref(), Some("0"));
        assert_eq!(b.contact, None);

        let b = body(json!({ "value": ["a"], "contact": { "n": 1 } }));
        assert_eq!(b.value, None);
        assert_eq!(b.contact, None);

        let b = body(json!({}));
        assert_eq!(b.value, None);
        assert_eq!(b.contact, None);
    }
}
