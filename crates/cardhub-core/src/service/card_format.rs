//! Conversion from stored character cards to the client `cards.json` shape.
//!
//! Uploaded cards usually follow the chara_card_v2 layout, where the useful
//! fields sit under a nested `data` object. Older uploads put them at the top
//! level, so every lookup checks the nested object first and then the root.

use cardhub_types::content::{Card, ContentItem, ContentKind};
use cardhub_types::error::FormatError;
use serde_json::Value;

/// Turns stored character card items into client-facing cards.
///
/// The output is raw JSON so callers stay independent of the card shape.
pub trait CardFormatter: Send + Sync {
    fn format(
        &self,
        items: &[ContentItem],
    ) -> impl std::future::Future<Output = Result<Value, FormatError>> + Send;
}

/// Default formatter producing [`Card`] records.
#[derive(Debug, Clone, Default)]
pub struct TavernCardFormatter;

impl TavernCardFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl CardFormatter for TavernCardFormatter {
    async fn format(&self, items: &[ContentItem]) -> Result<Value, FormatError> {
        let mut cards = Vec::with_capacity(items.len());
        for item in items {
            if item.kind != ContentKind::CharacterCard {
                tracing::debug!(kind = %item.kind, id = %item.id, "skipping non-card item");
                continue;
            }
            cards.push(format_card(item)?);
        }

        serde_json::to_value(cards).map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

/// Format a single character card item.
pub fn format_card(item: &ContentItem) -> Result<Card, FormatError> {
    if !(item.data.is_object() || item.data.is_null()) {
        return Err(FormatError::InvalidPayload {
            name: item.name.clone(),
            reason: "card data must be a JSON object".to_string(),
        });
    }

    let description = if item.description.trim().is_empty() {
        lookup_str(&item.data, "description").unwrap_or_default()
    } else {
        item.description.clone()
    };

    let tags = if item.tags.is_empty() {
        lookup(&item.data, "tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    } else {
        item.tags.clone()
    };

    Ok(Card {
        id: item.id.to_string(),
        name: item.name.clone(),
        description,
        creator: lookup_str(&item.data, "creator"),
        character_version: lookup_str(&item.data, "character_version"),
        tags,
        created_at: item.created_at,
        updated_at: item.updated_at,
    })
}

fn lookup<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get("data")
        .and_then(|inner| inner.get(key))
        .or_else(|| data.get(key))
}

/// Non-blank string field, nested value preferred.
fn lookup_str(data: &Value, key: &str) -> Option<String> {
    let nested = data
        .get("data")
        .and_then(|inner| inner.get(key))
        .and_then(Value::as_str);
    let top = data.get(key).and_then(Value::as_str);

    nested
        .filter(|s| !s.trim().is_empty())
        .or(top.filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card_item(name: &str, data: Value) -> ContentItem {
        ContentItem::new(ContentKind::CharacterCard, name, data)
    }

    #[test]
    fn test_format_chara_card_v2_fields() {
        let item = card_item(
            "Luna",
            json!({
                "spec": "chara_card_v2",
                "data": {
                    "name": "Luna",
                    "description": "A moonlit librarian",
                    "creator": "ayla",
                    "character_version": "1.2",
                    "tags": ["fantasy", "library"]
                }
            }),
        );

        let card = format_card(&item).unwrap();
        assert_eq!(card.name, "Luna");
        assert_eq!(card.description, "A moonlit librarian");
        assert_eq!(card.creator.as_deref(), Some("ayla"));
        assert_eq!(card.character_version.as_deref(), Some("1.2"));
        assert_eq!(card.tags, vec!["fantasy", "library"]);
        assert_eq!(card.id, item.id.to_string());
    }

    #[test]
    fn test_format_falls_back_to_top_level_fields() {
        let item = card_item("Old", json!({ "creator": "legacy", "description": "v1 card" }));
        let card = format_card(&item).unwrap();
        assert_eq!(card.creator.as_deref(), Some("legacy"));
        assert_eq!(card.description, "v1 card");
        assert!(card.character_version.is_none());
    }

    #[test]
    fn test_item_fields_take_precedence_over_payload() {
        let mut item = card_item(
            "Tagged",
            json!({ "data": { "description": "from payload", "tags": ["payload"] } }),
        );
        item.description = "from item".to_string();
        item.tags = vec!["item".to_string()];

        let card = format_card(&item).unwrap();
        assert_eq!(card.description, "from item");
        assert_eq!(card.tags, vec!["item"]);
    }

    #[test]
    fn test_blank_nested_creator_uses_top_level() {
        let item = card_item("Blank", json!({ "creator": "root", "data": { "creator": "  " } }));
        let card = format_card(&item).unwrap();
        assert_eq!(card.creator.as_deref(), Some("root"));
    }

    #[test]
    fn test_null_payload_is_accepted() {
        let card = format_card(&card_item("Bare", Value::Null)).unwrap();
        assert_eq!(card.name, "Bare");
        assert!(card.tags.is_empty());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let err = format_card(&card_item("Broken", json!("just a string"))).unwrap_err();
        assert!(matches!(err, FormatError::InvalidPayload { ref name, .. } if name == "Broken"));
    }

    #[tokio::test]
    async fn test_formatter_skips_other_kinds() {
        let items = vec![
            card_item("Luna", json!({})),
            ContentItem::new(ContentKind::StoryBook, "Lore", json!({})),
        ];

        let value = TavernCardFormatter::new().format(&items).await.unwrap();
        let cards = value.as_array().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["name"], "Luna");
    }
}
