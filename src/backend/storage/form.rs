//! Multipart form parsing
//!
//! Upload endpoints receive `multipart/form-data`. The whole form is read
//! into memory (the router caps body sizes), text parts by name and file
//! parts by name.

use std::collections::HashMap;

use axum::{body::Bytes, extract::Multipart};

use crate::backend::error::BackendError;
use crate::shared::SharedError;

/// A file part of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Declared MIME type, `application/octet-stream` when absent
    pub fn mime(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Read every part of the form
    ///
    /// Parts with a file name are files; everything else is text. Later
    /// parts with the same name replace earlier ones.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Malformed multipart body: {}", e);
            BackendError::handler(e.status(), e.body_text())
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| BackendError::handler(e.status(), e.body_text()))?;
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| BackendError::handler(e.status(), e.body_text()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Text value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed, non-blank text value of a field
    pub fn trimmed(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Remove and return a file part
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|file| !file.is_empty())
    }

    /// Boolean field: `true`/`1`/`on` (case-insensitive) are true
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.text(name).map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "on" | "yes"
            )
        })
    }

    /// Numeric field
    pub fn number(&self, name: &str) -> Result<Option<f64>, SharedError> {
        match self.trimmed(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| SharedError::validation(name, format!("Invalid {}", name))),
        }
    }

    /// List field sent either as a JSON array string or comma separated
    pub fn string_list(&self, name: &str) -> Result<Option<Vec<String>>, SharedError> {
        let Some(raw) = self.trimmed(name) else {
            return Ok(None);
        };

        let items: Vec<String> = if raw.starts_with('[') {
            serde_json::from_str(&raw)
                .map_err(|_| SharedError::validation(name, format!("Invalid {}", name)))?
        } else {
            raw.split(',').map(str::to_string).collect()
        };

        Ok(Some(
            items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        ))
    }

    #[cfg(test)]
    pub(crate) fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}
