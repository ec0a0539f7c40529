//! Metadata documents written by the external analysis pipeline.
//!
//! Documents are schemaless JSON keyed by the storage file name. The fields
//! below are the ones Medley reads; everything else is kept verbatim in
//! `extra` so documents survive a round trip through the store untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One metadata document as stored in the document store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Written by older pipeline versions; read as a fallback for `tags`.
    #[serde(rename = "object_tags", default, skip_serializing_if = "Option::is_none")]
    pub object_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The analysis projection embedded in listing entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub tags: Vec<String>,
    pub transcript: String,
    pub extracted_text: String,
    pub scenes: Vec<Value>,
    pub topics: Vec<String>,
}

impl AiAnalysis {
    /// Project a metadata document into the listing shape. The fallback from
    /// `tags` to `object_tags` is presence-based: a document that carries an
    /// empty `tags` array keeps it, only an absent field falls through.
    pub fn from_record(record: &MetadataRecord) -> Self {
        AiAnalysis {
            tags: record
                .tags
                .clone()
                .or_else(|| record.object_tags.clone())
                .unwrap_or_default(),
            transcript: record.transcription.clone().unwrap_or_default(),
            extracted_text: record.extracted_text.clone().unwrap_or_default(),
            scenes: record.scenes.clone().unwrap_or_default(),
            topics: record.topics.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_names() {
        let record: MetadataRecord = serde_json::from_value(json!({
            "fileName": "1716000000000-clip.mp4",
            "originalName": "clip.mp4",
            "object_tags": ["sky"],
            "extractedText": "some text",
            "uploadTime": "2026-05-18T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.file_name.as_deref(), Some("1716000000000-clip.mp4"));
        assert_eq!(record.original_name.as_deref(), Some("clip.mp4"));
        assert_eq!(record.object_tags, Some(vec!["sky".to_string()]));
        assert_eq!(record.extracted_text.as_deref(), Some("some text"));
        assert!(record.upload_time.is_some());
    }

    #[test]
    fn test_record_preserves_unknown_fields() {
        let document = json!({
            "fileName": "x",
            "confidence": 0.92,
            "pipeline": {"version": 3}
        });
        let record: MetadataRecord = serde_json::from_value(document).unwrap();
        assert_eq!(record.extra.get("confidence"), Some(&json!(0.92)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back.get("pipeline"), Some(&json!({"version": 3})));
        assert_eq!(back.get("fileName"), Some(&json!("x")));
    }

    #[test]
    fn test_analysis_prefers_present_tags() {
        let record: MetadataRecord = serde_json::from_value(json!({
            "tags": ["beach", "sunset"],
            "object_tags": ["ignored"]
        }))
        .unwrap();
        let analysis = AiAnalysis::from_record(&record);
        assert_eq!(analysis.tags, vec!["beach", "sunset"]);
    }

    #[test]
    fn test_analysis_empty_tags_do_not_fall_through() {
        let record: MetadataRecord = serde_json::from_value(json!({
            "tags": [],
            "object_tags": ["should-not-appear"]
        }))
        .unwrap();
        let analysis = AiAnalysis::from_record(&record);
        assert!(analysis.tags.is_empty());
    }

    #[test]
    fn test_analysis_falls_back_to_object_tags() {
        let record: MetadataRecord = serde_json::from_value(json!({
            "object_tags": ["dog", "park"]
        }))
        .unwrap();
        let analysis = AiAnalysis::from_record(&record);
        assert_eq!(analysis.tags, vec!["dog", "park"]);
    }

    #[test]
    fn test_analysis_defaults_for_missing_fields() {
        let record = MetadataRecord::default();
        let analysis = AiAnalysis::from_record(&record);
        assert!(analysis.tags.is_empty());
        assert_eq!(analysis.transcript, "");
        assert_eq!(analysis.extracted_text, "");
        assert!(analysis.scenes.is_empty());
        assert!(analysis.topics.is_empty());
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let analysis = AiAnalysis {
            tags: vec![],
            transcript: "hello".to_string(),
            extracted_text: "text".to_string(),
            scenes: vec![],
            topics: vec![],
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("extractedText").is_some());
        assert!(value.get("transcript").is_some());
    }
}
