//! Catalog data types.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CatalogError;

/// Largest icon accepted for upload.
pub const MAX_ICON_BYTES: usize = 5 * 1024 * 1024;

/// Pasted base64 shorter than this is treated as an icon name, not image data.
const MIN_PASTED_ICON_LEN: usize = 100;

/// A tool as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    /// Same as `name`; the API has no separate id
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub detailed_description: Option<String>,
    pub target_audience: Option<String>,
    pub documentation: Option<String>,
    pub contact_info: Option<String>,
    pub icon: Option<String>,
    pub link: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Wire shape of a tool. Categories arrive in several shapes depending on the
/// API version.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTool {
    name: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    detailed_description: Option<String>,
    #[serde(default)]
    target_audience: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    contact_info: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    link: String,
    #[serde(default)]
    categories: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl From<RawTool> for Tool {
    fn from(raw: RawTool) -> Self {
        let categories = normalize_categories(raw.categories.as_ref(), raw.category.as_ref());
        Tool {
            id: raw.name.clone(),
            name: raw.name,
            short_description: raw.short_description,
            detailed_description: raw.detailed_description,
            target_audience: raw.target_audience,
            documentation: raw.documentation,
            contact_info: raw.contact_info,
            icon: raw.icon,
            link: raw.link,
            categories,
            tags: raw.tags.unwrap_or_default(),
        }
    }
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}

/// Prefer a `categories` array, then a legacy `category` array, then a single
/// non-blank `category` string.
pub fn normalize_categories(categories: Option<&Value>, category: Option<&Value>) -> Vec<String> {
    if let Some(list) = categories.and_then(string_array) {
        return list;
    }
    match category {
        Some(value) if value.is_array() => string_array(value).unwrap_or_default(),
        Some(Value::String(name)) if !name.trim().is_empty() => vec![name.clone()],
        _ => Vec::new(),
    }
}

/// A tool to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTool {
    pub name: String,
    pub short_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    pub link: String,
    /// Sent as `category`, always an array
    #[serde(rename = "category")]
    pub categories: Vec<String>,
    /// Raw base64 image data, no `data:` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.trim().is_empty()).then_some(value)
}

impl NewTool {
    pub fn new(name: impl Into<String>, short_description: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_detailed_description(mut self, text: impl Into<String>) -> Self {
        self.detailed_description = non_blank(text);
        self
    }

    pub fn with_documentation(mut self, text: impl Into<String>) -> Self {
        self.documentation = non_blank(text);
        self
    }

    pub fn with_contact_info(mut self, text: impl Into<String>) -> Self {
        self.contact_info = non_blank(text);
        self
    }

    /// Attach an image file's bytes as the icon.
    pub fn with_icon_bytes(mut self, bytes: &[u8]) -> Result<Self, CatalogError> {
        if bytes.len() > MAX_ICON_BYTES {
            return Err(CatalogError::IconTooLarge(bytes.len()));
        }
        self.icon = Some(STANDARD.encode(bytes));
        Ok(self)
    }

    /// Attach pasted base64 text as the icon. A `data:` URL prefix is
    /// stripped; text that does not look like image data is ignored.
    pub fn with_icon_base64(mut self, text: &str) -> Self {
        let data = match text.find(',') {
            Some(comma) if text.starts_with("data:") => &text[comma + 1..],
            _ => text,
        };
        let looks_like_base64 = data.len() > MIN_PASTED_ICON_LEN
            && data
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='));
        if looks_like_base64 {
            self.icon = Some(data.to_string());
        } else {
            tracing::debug!("Ignoring icon text that is not base64 image data");
        }
        self
    }

    /// Names of required fields that are missing.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.short_description.trim().is_empty() {
            missing.push("short_description".to_string());
        }
        if self.link.trim().is_empty() {
            missing.push("link".to_string());
        }
        if self.categories.is_empty() {
            missing.push("category".to_string());
        }
        missing
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::InvalidInput(missing))
        }
    }
}
