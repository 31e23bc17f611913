//! Core types for the iconik API.
//!
//! Catalog records are deserialized leniently: every field is optional and
//! numeric fields are kept as raw JSON values, because the search index
//! returns them inconsistently (numbers on some objects, strings on others,
//! absent on collections). Interpreting them is left to the caller.
//!
//! A field of the wrong JSON type never fails the page it arrived on. Text
//! fields accept numbers and booleans as their string form, and entries of
//! `files`/`formats` that are not objects are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// App ID and auth token used to sign every API request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application ID (`App-ID` header).
    pub app_id: String,
    /// Auth token (`Auth-Token` header).
    pub token: String,
}

impl Credentials {
    /// Create credentials from an App ID and token.
    #[must_use]
    pub fn new(app_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Kind of catalog object as reported in `object_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A media asset.
    Asset,
    /// A collection of assets and/or collections.
    Collection,
}

impl ObjectKind {
    /// Classify an `object_type` value. Unknown values yield `None`.
    #[must_use]
    pub fn from_object_type(value: &str) -> Option<Self> {
        match value {
            "assets" => Some(Self::Asset),
            "collections" => Some(Self::Collection),
            _ => None,
        }
    }
}

/// Media type bucket used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `video`
    Video,
    /// `audio`
    Audio,
    /// `image`
    Image,
    /// Any other non-empty media type.
    Other,
}

impl MediaKind {
    /// Classify a `media_type` value. An empty value yields `None`.
    #[must_use]
    pub fn from_media_type(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "image" => Some(Self::Image),
            _ => Some(Self::Other),
        }
    }
}

/// One asset or collection returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogObject {
    /// Object ID.
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    /// Title, used only for log messages.
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    /// `assets` or `collections`.
    #[serde(deserialize_with = "lenient::text")]
    pub object_type: Option<String>,
    /// `video`, `audio`, `image`, or anything else. Non-text values keep
    /// their JSON form so they still count as some other media type.
    #[serde(deserialize_with = "lenient::any_text")]
    pub media_type: Option<String>,
    /// Duration in milliseconds, as a number or numeric string.
    pub duration_milliseconds: Option<Value>,
    /// Files attached to the object.
    #[serde(deserialize_with = "lenient::records")]
    pub files: Option<Vec<FileRecord>>,
    /// Formats attached to the object.
    #[serde(deserialize_with = "lenient::records")]
    pub formats: Option<Vec<FormatRecord>>,
}

impl CatalogObject {
    /// Object kind derived from `object_type`.
    #[must_use]
    pub fn kind(&self) -> Option<ObjectKind> {
        self.object_type
            .as_deref()
            .and_then(ObjectKind::from_object_type)
    }

    /// Media bucket derived from `media_type`.
    #[must_use]
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media_type.as_deref().and_then(MediaKind::from_media_type)
    }

    /// Label for log messages: title, then id, then a placeholder.
    #[must_use]
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// A file belonging to a catalog object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecord {
    /// Storage the file lives on.
    #[serde(deserialize_with = "lenient::text")]
    pub storage_id: Option<String>,
    /// Size in bytes, as a number or numeric string.
    pub size: Option<Value>,
}

/// A format belonging to a catalog object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatRecord {
    /// Format name, e.g. `ORIGINAL` or `PPRO_PROXY`.
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

/// One page of a scrolled search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    /// Cursor for the next page.
    pub scroll_id: Option<String>,
    /// Objects on this page. Empty marks the end of the scroll.
    pub objects: Vec<CatalogObject>,
    /// Total hits reported by the server, if any.
    #[serde(deserialize_with = "lenient::count")]
    pub total: Option<u64>,
}

impl SearchPage {
    /// Create a page from a cursor and objects.
    #[must_use]
    pub fn new(scroll_id: impl Into<String>, objects: Vec<CatalogObject>) -> Self {
        Self {
            scroll_id: Some(scroll_id.into()),
            objects,
            total: None,
        }
    }

    /// The terminating page of a scroll.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Storage details returned by the files API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Storage ID.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
}

/// Deserializers that map wrongly-typed values instead of failing.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings as-is, numbers and booleans as their string form, anything
    /// else as `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
    }

    /// Like [`text`], but arrays and objects keep their JSON form.
    pub fn any_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    /// A list of records. Entries that are not objects, or do not decode,
    /// are dropped. A non-list value is `None`.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    /// A non-negative integer, or `None`.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_u64())
    }
}
