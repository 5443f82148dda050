use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type PhraseId = Uuid;

/// Category assigned to phrases created without one
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phrase {
    pub id: PhraseId,
    pub text: String,
    pub category: String,
}

impl Phrase {
    pub fn new(id: PhraseId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Length in characters, which is also the length of the visible string
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
