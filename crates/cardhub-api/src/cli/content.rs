//! Content CLI commands: import, list.

use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use serde_json::Value;

use cardhub_core::repository::content::ContentRepository;
use cardhub_types::content::{ContentItem, ContentKind};

use crate::state::AppState;

/// Import every object in a JSON file as content of `kind`.
///
/// # Examples
///
/// ```bash
/// cardhub import --kind character_card luna.json
/// cardhub import -k story-book lore.json
/// ```
pub async fn import_file(state: &AppState, kind: ContentKind, file: &Path, json: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let items = items_from_json(kind, value)?;
    let repo = state.card_service.repo();
    for item in &items {
        repo.create(item)
            .await
            .context("failed to store content (is DATABASE_URL set?)")?;
        tracing::debug!(id = %item.id, name = %item.name, %kind, "imported content");
    }

    if json {
        let ids: Vec<String> = items.iter().map(|i| i.id.to_string()).collect();
        println!("{}", serde_json::json!({ "imported": items.len(), "kind": kind, "ids": ids }));
    } else {
        println!(
            "  {} Imported {} {} item{} from {}",
            style("✓").green().bold(),
            style(items.len()).bold(),
            style(kind).cyan(),
            if items.len() == 1 { "" } else { "s" },
            file.display()
        );
    }

    Ok(())
}

/// List stored content of one kind.
pub async fn list_contents(state: &AppState, kind: ContentKind, json: bool) -> Result<()> {
    let items = state
        .card_service
        .repo()
        .list_by_kind(kind)
        .await
        .context("failed to list content (is DATABASE_URL set?)")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!();
        println!(
            "  {} No {} content stored. Add some with: {}",
            style("i").blue().bold(),
            kind,
            style(format!("cardhub import --kind {kind} <file.json>")).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Tags").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for item in &items {
        table.add_row(vec![
            Cell::new(&item.name).fg(Color::Cyan),
            Cell::new(&item.description),
            Cell::new(item.tags.join(", ")),
            Cell::new(item.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} {} item{}",
        style(items.len()).bold(),
        kind,
        if items.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Build content items from an imported JSON document.
///
/// Accepts a single object or an array of objects. Name, description, and
/// tags are read from the object itself or from its nested `data` object
/// (chara_card_v2 layout). The whole object is kept as the item payload.
pub fn items_from_json(kind: ContentKind, value: Value) -> Result<Vec<ContentItem>> {
    let objects = match value {
        Value::Array(values) => values,
        obj @ Value::Object(_) => vec![obj],
        _ => bail!("expected a JSON object or an array of objects"),
    };

    let mut items = Vec::with_capacity(objects.len());
    for (index, obj) in objects.into_iter().enumerate() {
        if !obj.is_object() {
            bail!("entry {index} is not a JSON object");
        }

        let Some(name) = field_str(&obj, "name") else {
            bail!("entry {index} has no name");
        };

        let mut item = ContentItem::new(kind, name, Value::Null);
        item.description = field_str(&obj, "description").unwrap_or_default();
        item.tags = field(&obj, "tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        item.data = obj;
        items.push(item);
    }

    Ok(items)
}

fn field<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).or_else(|| obj.get("data").and_then(|d| d.get(key)))
}

fn field_str(obj: &Value, key: &str) -> Option<String> {
    field(obj, key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_chara_card_v2_object() {
        let doc = json!({
            "spec": "chara_card_v2",
            "data": { "name": "Luna", "description": "Librarian", "tags": ["fantasy"] }
        });

        let items = items_from_json(ContentKind::CharacterCard, doc.clone()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Luna");
        assert_eq!(items[0].description, "Librarian");
        assert_eq!(items[0].tags, vec!["fantasy"]);
        assert_eq!(items[0].kind, ContentKind::CharacterCard);
        assert_eq!(items[0].data, doc);
    }

    #[test]
    fn test_array_with_top_level_fields() {
        let doc = json!([
            { "name": "Lore A", "entries": [] },
            { "name": "Lore B", "description": "second" }
        ]);

        let items = items_from_json(ContentKind::StoryBook, doc).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Lore A", "Lore B"]);
        assert_eq!(items[1].description, "second");
        assert!(items[0].tags.is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = items_from_json(ContentKind::EventBook, json!([{ "name": "ok" }, { "x": 1 }]))
            .unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(items_from_json(ContentKind::PromptInjection, json!(42)).is_err());
        assert!(items_from_json(ContentKind::PromptInjection, json!(["text"])).is_err());
    }
}
