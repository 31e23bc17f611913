//! Fold catalog objects into report totals
//!
//! Records are partially populated: collections carry no media type or
//! files, durations and sizes arrive as numbers or numeric strings, and some
//! are simply garbage. Numeric fields go through [`FieldValue`] so that a bad
//! value costs a zero contribution (and a counter bump) instead of the run.

use iconik::{CatalogObject, MediaKind, ObjectKind};
use indexmap::IndexMap;
use serde_json::Value;

const US_PER_MS: f64 = 1000.0;

// ============================================================================
// Parse-or-default
// ============================================================================

/// Outcome of reading a numeric field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    /// The field held a usable value.
    Parsed(T),
    /// The field was absent or null.
    Missing,
    /// The field was present but unusable; holds the raw text.
    Malformed(String),
}

/// Read a non-negative number from a JSON number or numeric string.
fn parse_number(value: Option<&Value>) -> FieldValue<f64> {
    let parsed = match value {
        None | Some(Value::Null) => return FieldValue::Missing,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => FieldValue::Parsed(n),
        _ => FieldValue::Malformed(value.map(Value::to_string).unwrap_or_default()),
    }
}

/// Read a duration in milliseconds as whole microseconds.
pub fn parse_duration(value: Option<&Value>) -> FieldValue<u64> {
    match parse_number(value) {
        FieldValue::Parsed(ms) => FieldValue::Parsed((ms * US_PER_MS).round() as u64),
        FieldValue::Missing => FieldValue::Missing,
        FieldValue::Malformed(raw) => FieldValue::Malformed(raw),
    }
}

/// Read a byte count. Fractional sizes are malformed.
pub fn parse_size(value: Option<&Value>) -> FieldValue<u64> {
    if let Some(Value::Number(n)) = value {
        if let Some(size) = n.as_u64() {
            return FieldValue::Parsed(size);
        }
    }

    match parse_number(value) {
        FieldValue::Parsed(size) if size.fract() == 0.0 => FieldValue::Parsed(size as u64),
        FieldValue::Parsed(_) => {
            FieldValue::Malformed(value.map(Value::to_string).unwrap_or_default())
        }
        FieldValue::Missing => FieldValue::Missing,
        FieldValue::Malformed(raw) => FieldValue::Malformed(raw),
    }
}

// ============================================================================
// Aggregate state
// ============================================================================

/// Running totals for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateState {
    pub asset_count: u64,
    pub collection_count: u64,
    pub video_count: u64,
    pub audio_count: u64,
    pub image_count: u64,
    pub other_count: u64,
    /// Sum of all parseable durations, in microseconds.
    pub total_duration_us: u64,
    /// storage_id -> bytes, in first-seen order
    pub storage_bytes: IndexMap<String, u64>,
    /// format name -> occurrences, in first-seen order
    pub format_counts: IndexMap<String, u64>,
    /// Objects whose duration was present but unusable.
    pub malformed_durations: u64,
    /// Files left out of storage totals (no storage_id, or bad size).
    pub skipped_files: u64,
}

impl AggregateState {
    /// Fold every object into a fresh state.
    pub fn from_objects<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogObject>,
    {
        let mut state = Self::default();
        for object in objects {
            state.fold(object);
        }
        state
    }

    /// Fold one object into the totals.
    pub fn fold(&mut self, object: &CatalogObject) {
        match object.media_kind() {
            Some(MediaKind::Video) => self.video_count += 1,
            Some(MediaKind::Audio) => self.audio_count += 1,
            Some(MediaKind::Image) => self.image_count += 1,
            Some(MediaKind::Other) => self.other_count += 1,
            None => {}
        }

        match object.kind() {
            Some(ObjectKind::Asset) => self.asset_count += 1,
            Some(ObjectKind::Collection) => self.collection_count += 1,
            None => {}
        }

        match parse_duration(object.duration_milliseconds.as_ref()) {
            FieldValue::Parsed(us) => {
                self.total_duration_us = self.total_duration_us.saturating_add(us);
            }
            FieldValue::Missing => {}
            FieldValue::Malformed(raw) => {
                log::debug!("{}: ignoring duration {}", object.label(), raw);
                self.malformed_durations += 1;
            }
        }

        for file in object.files.iter().flatten() {
            let storage_id = match file.storage_id.as_deref() {
                Some(id) if !id.is_empty() => id,
                _ => {
                    log::debug!("{}: skipping file without storage_id", object.label());
                    self.skipped_files += 1;
                    continue;
                }
            };

            match parse_size(file.size.as_ref()) {
                FieldValue::Parsed(size) => {
                    let total = self.storage_bytes.entry(storage_id.to_string()).or_insert(0);
                    *total = total.saturating_add(size);
                }
                FieldValue::Missing => {
                    log::debug!("{}: skipping file without size", object.label());
                    self.skipped_files += 1;
                }
                FieldValue::Malformed(raw) => {
                    log::debug!("{}: skipping file with size {}", object.label(), raw);
                    self.skipped_files += 1;
                }
            }
        }

        for format in object.formats.iter().flatten() {
            if let Some(name) = format.name.as_deref() {
                *self.format_counts.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Total duration in milliseconds.
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_us as f64 / US_PER_MS
    }

    /// Bytes across every storage.
    pub fn total_bytes(&self) -> u64 {
        self.storage_bytes
            .values()
            .fold(0u64, |acc, bytes| acc.saturating_add(*bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconik::{FileRecord, FormatRecord};
    use serde_json::json;

    const ONE_GB: u64 = 1024 * 1024 * 1024;

    fn file(storage_id: &str, size: Value) -> FileRecord {
        FileRecord {
            storage_id: Some(storage_id.to_string()),
            size: Some(size),
        }
    }

    fn format(name: &str) -> FormatRecord {
        FormatRecord {
            name: Some(name.to_string()),
        }
    }

    fn asset(media_type: &str) -> CatalogObject {
        CatalogObject {
            object_type: Some("assets".to_string()),
            media_type: Some(media_type.to_string()),
            ..Default::default()
        }
    }

    fn sample_objects() -> Vec<CatalogObject> {
        vec![
            CatalogObject {
                duration_milliseconds: Some(json!("5000")),
                files: Some(vec![file("s1", json!("1073741824")), file("s2", json!(10))]),
                formats: Some(vec![format("ORIGINAL"), format("PROXY")]),
                ..asset("video")
            },
            CatalogObject {
                duration_milliseconds: Some(json!(1234.4)),
                files: Some(vec![file("s1", json!(5))]),
                formats: Some(vec![format("ORIGINAL")]),
                ..asset("audio")
            },
            CatalogObject {
                duration_milliseconds: Some(json!("n/a")),
                files: Some(vec![file("s3", json!("oops"))]),
                ..asset("image")
            },
            asset("document"),
            CatalogObject {
                object_type: Some("collections".to_string()),
                ..Default::default()
            },
            CatalogObject {
                object_type: Some("segments".to_string()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(None), FieldValue::Missing);
        assert_eq!(parse_duration(Some(&Value::Null)), FieldValue::Missing);
        assert_eq!(parse_duration(Some(&json!(5000))), FieldValue::Parsed(5_000_000));
        assert_eq!(parse_duration(Some(&json!("5000"))), FieldValue::Parsed(5_000_000));
        assert_eq!(parse_duration(Some(&json!(" 40.6 "))), FieldValue::Parsed(40_600));
        assert_eq!(parse_duration(Some(&json!(0.4))), FieldValue::Parsed(400));
        assert_eq!(
            parse_duration(Some(&json!("abc"))),
            FieldValue::Malformed("\"abc\"".to_string())
        );
        assert!(matches!(
            parse_duration(Some(&json!(-1))),
            FieldValue::Malformed(_)
        ));
        assert!(matches!(
            parse_duration(Some(&json!([1]))),
            FieldValue::Malformed(_)
        ));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(None), FieldValue::Missing);
        assert_eq!(parse_size(Some(&json!(ONE_GB))), FieldValue::Parsed(ONE_GB));
        assert_eq!(
            parse_size(Some(&json!("1073741824"))),
            FieldValue::Parsed(ONE_GB)
        );
        assert_eq!(parse_size(Some(&json!("1024.0"))), FieldValue::Parsed(1024));
        assert!(matches!(parse_size(Some(&json!("12.5"))), FieldValue::Malformed(_)));
        assert!(matches!(parse_size(Some(&json!("big"))), FieldValue::Malformed(_)));
        assert!(matches!(parse_size(Some(&json!(-3))), FieldValue::Malformed(_)));
        assert!(matches!(parse_size(Some(&json!("NaN"))), FieldValue::Malformed(_)));
    }

    #[test]
    fn test_maps_keep_first_seen_order() {
        let object = CatalogObject {
            files: Some(vec![file("s2", json!(1)), file("s1", json!(2)), file("s2", json!(3))]),
            formats: Some(vec![format("PROXY"), format("ORIGINAL"), format("PROXY")]),
            ..asset("video")
        };
        let state = AggregateState::from_objects([&object]);

        let storages: Vec<_> = state.storage_bytes.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(storages, vec![("s2", 4), ("s1", 2)]);
        let formats: Vec<_> = state.format_counts.keys().map(String::as_str).collect();
        assert_eq!(formats, vec!["PROXY", "ORIGINAL"]);
        assert_eq!(state.total_bytes(), 6);
    }

    #[test]
    fn test_fractional_durations_sum_before_rounding() {
        let objects: Vec<_> = (0..3)
            .map(|_| CatalogObject {
                duration_milliseconds: Some(json!(0.4)),
                ..asset("video")
            })
            .collect();
        let state = AggregateState::from_objects(&objects);

        assert_eq!(state.total_duration_us, 1200);
        assert!((state.total_duration_ms() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_fold_counts() {
        let state = AggregateState::from_objects(&sample_objects());

        assert_eq!(state.asset_count, 4);
        assert_eq!(state.collection_count, 1);
        assert_eq!(state.video_count, 1);
        assert_eq!(state.audio_count, 1);
        assert_eq!(state.image_count, 1);
        assert_eq!(state.other_count, 1);
        assert_eq!(state.total_duration_us, 6_234_400);
        assert_eq!(state.malformed_durations, 1);
        assert_eq!(state.skipped_files, 1);
        assert_eq!(state.storage_bytes.get("s1"), Some(&(ONE_GB + 5)));
        assert_eq!(state.storage_bytes.get("s2"), Some(&10));
        assert_eq!(state.storage_bytes.get("s3"), None);
        assert_eq!(state.format_counts.get("ORIGINAL"), Some(&2));
        assert_eq!(state.format_counts.get("PROXY"), Some(&1));
        assert_eq!(state.total_bytes(), ONE_GB + 15);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let objects = sample_objects();
        let forward = AggregateState::from_objects(&objects);

        let reversed: Vec<_> = objects.iter().rev().cloned().collect();
        assert_eq!(AggregateState::from_objects(&reversed), forward);

        for shift in 1..objects.len() {
            let mut rotated = objects.clone();
            rotated.rotate_left(shift);
            assert_eq!(AggregateState::from_objects(&rotated), forward);
        }
    }

    #[test]
    fn test_missing_media_type_still_counts_object_type() {
        let collection = CatalogObject {
            object_type: Some("collections".to_string()),
            ..Default::default()
        };
        let untyped_asset = CatalogObject {
            object_type: Some("assets".to_string()),
            ..Default::default()
        };
        let state = AggregateState::from_objects([&collection, &untyped_asset]);

        assert_eq!(state.collection_count, 1);
        assert_eq!(state.asset_count, 1);
        assert_eq!(
            state.video_count + state.audio_count + state.image_count + state.other_count,
            0
        );
    }

    #[test]
    fn test_empty_media_type_counts_nothing() {
        let state = AggregateState::from_objects([&asset("")]);
        assert_eq!(state.other_count, 0);
        assert_eq!(state.asset_count, 1);
    }

    #[test]
    fn test_bad_size_does_not_touch_other_storages() {
        let object = CatalogObject {
            files: Some(vec![
                file("s1", json!(100)),
                file("s1", json!("garbage")),
                file("s2", json!(null)),
                FileRecord {
                    storage_id: None,
                    size: Some(json!(50)),
                },
                file("s1", json!("20")),
            ]),
            ..asset("video")
        };

        let state = AggregateState::from_objects([&object]);
        assert_eq!(state.storage_bytes.get("s1"), Some(&120));
        assert_eq!(state.storage_bytes.get("s2"), None);
        assert_eq!(state.storage_bytes.len(), 1);
        assert_eq!(state.skipped_files, 3);
    }

    #[test]
    fn test_format_without_name_is_ignored() {
        let object = CatalogObject {
            formats: Some(vec![FormatRecord { name: None }, format("ORIGINAL")]),
            ..asset("video")
        };
        let state = AggregateState::from_objects([&object]);
        assert_eq!(state.format_counts.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let state = AggregateState::from_objects(&Vec::<CatalogObject>::new());
        assert_eq!(state, AggregateState::default());
        assert_eq!(state.total_bytes(), 0);
        assert!(state.format_counts.is_empty());
    }
}
