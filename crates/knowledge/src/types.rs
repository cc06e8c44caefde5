//! Knowledge type definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document chunk returned by the vector store.
///
/// Content and metadata are whatever the ingestion side stored; this crate
/// never writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Chunk text
    pub page_content: String,

    /// Free-form metadata (source file, page, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Cosine distance to the query as reported by the store (lower is closer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
}

impl Document {
    /// Create a document with text only.
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
            distance: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach the store distance.
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = Some(distance);
        self
    }

    /// First `max_chars` characters of the content.
    ///
    /// Counts Unicode scalar values so multi-byte text is never split.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.page_content.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.page_content[..byte_idx],
            None => &self.page_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_to_char_count() {
        let doc = Document::new("a".repeat(250));
        assert_eq!(doc.preview(200).len(), 200);

        let short = Document::new("Copa do Mundo");
        assert_eq!(short.preview(200), "Copa do Mundo");
    }

    #[test]
    fn test_preview_respects_multibyte_chars() {
        let doc = Document::new("ção".repeat(100));
        let preview = doc.preview(200);
        assert_eq!(preview.chars().count(), 200);
        assert!(preview.starts_with("çãoção"));
    }

    #[test]
    fn test_metadata_roundtrips_as_json_object() {
        let mut metadata = Map::new();
        metadata.insert("source".to_string(), Value::from("document.pdf"));
        metadata.insert("page".to_string(), Value::from(3));

        let doc = Document::new("texto").with_metadata(metadata);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["metadata"]["page"], 3);
        assert!(json.get("distance").is_none());
    }
}
