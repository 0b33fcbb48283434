//! Form extractor for inventory and supplier writes.
//!
//! Accepts `multipart/form-data` (text fields plus an optional `image` file part) or a
//! JSON object. Multipart text arrives as strings, so numeric accessors accept both
//! JSON numbers and numeric strings.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Multipart part name carrying the item image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct FormFields(HashMap<String, Value>);

impl FormFields {
    pub fn is_falsy(&self, name: &str) -> bool {
        is_falsy_value(self.0.get(name))
    }

    /// String form of a scalar field. Null and absent yield `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        scalar_text(self.0.get(name)?)
    }

    pub fn integer(&self, name: &str) -> Result<Option<i64>, AppError> {
        let invalid = || AppError::Validation(format!("{} must be an integer", name));
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
        }
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>, AppError> {
        let invalid = || AppError::Validation(format!("{} must be a number", name));
        let n = match self.0.get(name) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
            Some(_) => return Err(invalid()),
        };
        if n.is_finite() {
            Ok(Some(n))
        } else {
            Err(invalid())
        }
    }
}

/// Absent, null, `false`, `""` and `0` all count as not supplied.
pub fn is_falsy_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Strings pass through, numbers and booleans are stringified, anything else is `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl FromIterator<(String, Value)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        FormFields(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormData {
    pub fields: FormFields,
    pub image: Option<ImageUpload>,
}

impl FormData {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = HashMap::new();
        let mut image = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_FIELD {
                if let Some(file_name) = field.file_name().map(str::to_string) {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    // Browsers send an empty part when no file was chosen.
                    if !file_name.is_empty() && !bytes.is_empty() {
                        image = Some(ImageUpload {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                    continue;
                }
            }
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            fields.insert(name, Value::String(text));
        }
        Ok(FormData {
            fields: FormFields(fields),
            image,
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);
        if is_multipart {
            let multipart = Multipart::from_request(req, state).await?;
            return FormData::from_multipart(multipart).await;
        }
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        match body {
            Value::Object(map) => Ok(FormData {
                fields: map.into_iter().collect(),
                image: None,
            }),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
