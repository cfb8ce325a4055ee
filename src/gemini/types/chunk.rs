use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{nullable, Part};

/// One incremental unit of a `streamGenerateContent` response.
///
/// `candidates` is always a list; an absent or `null` list decodes as empty.
/// Fields this crate does not model (`usageMetadata`, `modelVersion`, ...) are
/// kept in `extra` so a forwarded chunk serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseChunk {
    #[serde(default, deserialize_with = "nullable")]
    pub candidates: Vec<Candidate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One alternative completion within a chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, deserialize_with = "nullable")]
    pub index: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Content,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "nullable")]
    pub parts: Vec<Part>,
}

impl ResponseChunk {
    /// A chunk with a single `model` candidate holding `parts`.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                index: 0,
                content: Content {
                    role: "model".to_string(),
                    parts,
                },
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    /// The only candidate this crate inspects. Later candidates are ignored.
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Concatenated text of the first candidate's text parts, if it has any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.first_candidate()?.content.parts;
        let mut texts = parts.iter().filter_map(Part::as_text).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}
