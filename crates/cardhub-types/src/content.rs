//! Stored content items, their kinds, and the client-facing card shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a stored content item, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Create a new ContentId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The five kinds of content the store holds.
///
/// Character cards are the primary kind served to clients. The other four
/// ("companion" kinds) attach lore, events, and prompt fragments to cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    CharacterCard,
    StoryBook,
    KnowledgeBase,
    EventBook,
    PromptInjection,
}

impl ContentKind {
    /// All kinds, character cards first.
    pub const ALL: [ContentKind; 5] = [
        ContentKind::CharacterCard,
        ContentKind::StoryBook,
        ContentKind::KnowledgeBase,
        ContentKind::EventBook,
        ContentKind::PromptInjection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::CharacterCard => "character_card",
            ContentKind::StoryBook => "story_book",
            ContentKind::KnowledgeBase => "knowledge_base",
            ContentKind::EventBook => "event_book",
            ContentKind::PromptInjection => "prompt_injection",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "character_card" => Ok(ContentKind::CharacterCard),
            "story_book" => Ok(ContentKind::StoryBook),
            "knowledge_base" => Ok(ContentKind::KnowledgeBase),
            "event_book" => Ok(ContentKind::EventBook),
            "prompt_injection" => Ok(ContentKind::PromptInjection),
            _ => Err(format!("invalid content kind: '{s}'")),
        }
    }
}

/// A stored piece of content of one kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Raw payload as uploaded (for character cards, a chara_card_v2 document).
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Build a new item stamped with a fresh id and the current time.
    pub fn new(kind: ContentKind, name: impl Into<String>, data: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: ContentId::new(),
            kind,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Client-facing representation of a character card in `cards.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_version: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a successful `cards.json` response.
///
/// Cards are kept as raw JSON: their shape belongs to the formatter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardList {
    pub cards: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_and_parse() {
        for kind in ContentKind::ALL {
            let parsed: ContentKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            "Story-Book".parse::<ContentKind>().unwrap(),
            ContentKind::StoryBook
        );
        assert!("lorebook".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_kind_serde_matches_display() {
        let json = serde_json::to_string(&ContentKind::PromptInjection).unwrap();
        assert_eq!(json, "\"prompt_injection\"");
    }

    #[test]
    fn test_card_skips_missing_optional_fields() {
        let now = Utc::now();
        let card = Card {
            id: "abc".to_string(),
            name: "Luna".to_string(),
            description: String::new(),
            creator: None,
            character_version: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&card).unwrap();
        assert!(value.get("creator").is_none());
        assert!(value.get("character_version").is_none());
    }

    #[test]
    fn test_empty_card_list_serializes_to_empty_array() {
        let json = serde_json::to_string(&CardList::default()).unwrap();
        assert_eq!(json, r#"{"cards":[]}"#);
    }
}
