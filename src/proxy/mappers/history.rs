// Client history normalization
// Turns the loosely-typed widget history into the flat role/text shape sent upstream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextFragment {
    Raw(String),
    Wrapped { text: String },
    // Anything else the widget might send (numbers, images, null, ...)
    Unsupported(Value),
}

impl TextFragment {
    pub fn into_text(self) -> Option<String> {
        match self {
            TextFragment::Raw(text) | TextFragment::Wrapped { text } => Some(text),
            TextFragment::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    #[serde(default)]
    pub parts: Option<Vec<TextFragment>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTurn {
    pub role: String,
    pub parts: Vec<String>,
}

impl ConversationTurn {
    // None when no usable text survives; such turns must not be forwarded.
    pub fn normalize(self) -> Option<NormalizedTurn> {
        let parts: Vec<String> = self
            .parts
            .unwrap_or_default()
            .into_iter()
            .filter_map(TextFragment::into_text)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(NormalizedTurn {
                role: self.role,
                parts,
            })
        }
    }
}

/// Normalizes raw history entries as received in the request body.
///
/// Entries that cannot be read as a turn at all (not an object, missing or
/// non-string role, `parts` that is not a list) are skipped like empty turns. This never
/// fails: bad input only shrinks the output.
pub fn normalize_history(history: &[Value]) -> Vec<NormalizedTurn> {
    history
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match ConversationTurn::deserialize(raw) {
            Ok(turn) => turn.normalize(),
            Err(e) => {
                tracing::debug!("[History] Skipping unreadable entry #{}: {}", index, e);
                None
            }
        })
        .collect()
}
