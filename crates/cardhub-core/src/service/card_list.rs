//! Card listing use case behind `GET /api/cards.json`.
//!
//! Character cards are required: a failure to read them fails the listing.
//! The companion kinds are read afterwards on a best-effort basis; a failure
//! there is logged and ignored. Their contents are not part of the response.

use cardhub_types::config::AccessKeys;
use cardhub_types::content::{CardList, ContentItem, ContentKind};
use cardhub_types::error::CardListError;
use serde::Serialize;
use serde_json::Value;

use crate::repository::content::ContentRepository;
use crate::service::card_format::CardFormatter;

/// Maximum length of payload previews written to the log.
const PREVIEW_CHARS: usize = 200;

/// Kinds read per listing, in order, with whether a failure is fatal.
const FETCH_PLAN: [(ContentKind, bool); 5] = [
    (ContentKind::CharacterCard, true),
    (ContentKind::StoryBook, false),
    (ContentKind::KnowledgeBase, false),
    (ContentKind::EventBook, false),
    (ContentKind::PromptInjection, false),
];

/// Service producing the public card list.
///
/// Generic over the repository and formatter traits -- cardhub-core never
/// depends on cardhub-infra.
pub struct CardListService<R: ContentRepository, F: CardFormatter> {
    repo: R,
    formatter: F,
    keys: AccessKeys,
    prefetch_companions: bool,
}

impl<R: ContentRepository, F: CardFormatter> CardListService<R, F> {
    /// Create a new CardListService.
    ///
    /// - `repo`: storage for content items
    /// - `formatter`: converts character cards to the client shape
    /// - `keys`: access secrets read once at startup
    /// - `prefetch_companions`: whether to read the companion kinds as well
    pub fn new(repo: R, formatter: F, keys: AccessKeys, prefetch_companions: bool) -> Self {
        Self {
            repo,
            formatter,
            keys,
            prefetch_companions,
        }
    }

    /// Access the underlying repository (used by the CLI import/list commands).
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Build the public card list.
    ///
    /// 1. Refuses with `KeyRequired` when a member key is configured.
    /// 2. Reads character cards; an empty result short-circuits to `{cards: []}`.
    /// 3. Reads the companion kinds, absorbing failures.
    /// 4. Formats the cards; a non-array formatter result becomes an empty list.
    pub async fn list_cards(&self) -> Result<CardList, CardListError> {
        if self.keys.member_key_required() {
            tracing::info!("member key configured, refusing unkeyed card listing");
            return Err(CardListError::KeyRequired);
        }

        let mut character_cards: Vec<ContentItem> = Vec::new();

        for (kind, required) in FETCH_PLAN {
            if required {
                character_cards = self.repo.list_by_kind(kind).await?;
                if character_cards.is_empty() {
                    tracing::info!("no character cards found");
                    return Ok(CardList::default());
                }
                tracing::info!(count = character_cards.len(), "fetched character cards");
                continue;
            }

            if !self.prefetch_companions {
                continue;
            }

            match self.repo.list_by_kind(kind).await {
                Ok(items) => {
                    tracing::debug!(%kind, count = items.len(), "fetched companion content");
                }
                Err(e) => {
                    tracing::warn!(%kind, error = %e, "failed to fetch companion content, continuing");
                }
            }
        }

        tracing::debug!(preview = %preview(&character_cards), "character card data");
        let formatted = self.formatter.format(&character_cards).await?;
        tracing::debug!(preview = %preview(&formatted), "formatted card data");

        let cards = match formatted {
            Value::Array(cards) => cards,
            other => {
                tracing::warn!(
                    kind = json_type(&other),
                    "formatter returned a non-array value, substituting an empty list"
                );
                Vec::new()
            }
        };

        Ok(CardList { cards })
    }
}

/// Serialize `value` and cut it to [`PREVIEW_CHARS`] characters.
fn preview<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json.chars().take(PREVIEW_CHARS).collect(),
        Err(e) => format!("<unserializable: {e}>"),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
