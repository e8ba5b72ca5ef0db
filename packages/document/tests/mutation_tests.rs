//! Mutation sequences over realistic pages

use pagewright_document::{BlockInstance, Document, Location, Mutation, MutationError};
use pagewright_schema::{build_default_props_with_id, props_from_value, PropertyMap};
use serde_json::json;

fn with_id(block_type: &str, id: &str) -> BlockInstance {
    BlockInstance::new(block_type, props_from_value(json!({ "id": id })).unwrap())
}

fn columns_page() -> Document {
    let doc = Document::with_title("Home")
        .append_block(with_id("HeadingBlock", "heading"))
        .append_block(BlockInstance::new(
            "ColumnsBlock",
            props_from_value(json!({ "id": "cols", "columns": 2 })).unwrap(),
        ));
    doc.ensure_zones()
}

#[test]
fn test_insert_then_move_between_zones() -> anyhow::Result<()> {
    let doc = columns_page();

    let doc = Mutation::InsertBlock {
        destination: Location::zone("cols", "column-0"),
        index: 0,
        block: with_id("TextBlock", "text"),
    }
    .apply(&doc)?;
    assert_eq!(doc.zones["cols:column-0"].len(), 1);

    let doc = Mutation::MoveBlock {
        block_id: "text".to_string(),
        destination: Location::zone("cols", "column-1"),
        index: 10,
    }
    .apply(&doc)?;

    assert!(doc.zones["cols:column-0"].is_empty());
    assert_eq!(doc.zones["cols:column-1"][0].id(), Some("text"));
    Ok(())
}

#[test]
fn test_move_to_root_reorders() -> anyhow::Result<()> {
    let doc = Mutation::MoveBlock {
        block_id: "cols".to_string(),
        destination: Location::Root,
        index: 0,
    }
    .apply(&columns_page())?;

    let order: Vec<_> = doc.content.iter().filter_map(|b| b.id()).collect();
    assert_eq!(order, vec!["cols", "heading"]);
    Ok(())
}

#[test]
fn test_move_into_own_zone_is_rejected() {
    let doc = columns_page();
    let result = Mutation::MoveBlock {
        block_id: "cols".to_string(),
        destination: Location::zone("cols", "column-0"),
        index: 0,
    }
    .apply(&doc);

    assert_eq!(result, Err(MutationError::CycleDetected));
}

#[test]
fn test_move_into_nested_descendant_zone_is_rejected() -> anyhow::Result<()> {
    let doc = Mutation::InsertBlock {
        destination: Location::zone("cols", "column-0"),
        index: 0,
        block: with_id("ContainerBlock", "inner"),
    }
    .apply(&columns_page())?;

    let result = Mutation::MoveBlock {
        block_id: "cols".to_string(),
        destination: Location::zone("inner", "container-content"),
        index: 0,
    }
    .apply(&doc);

    assert_eq!(result, Err(MutationError::CycleDetected));
    Ok(())
}

#[test]
fn test_remove_container_drops_nested_zones() -> anyhow::Result<()> {
    let doc = Mutation::InsertBlock {
        destination: Location::zone("cols", "column-1"),
        index: 0,
        block: with_id("ContainerBlock", "inner"),
    }
    .apply(&columns_page())?;
    let doc = Mutation::InsertBlock {
        destination: Location::zone("inner", "container-content"),
        index: 0,
        block: with_id("TextBlock", "deep"),
    }
    .apply(&doc)?;
    assert!(doc.contains_id("deep"));

    let doc = Mutation::RemoveBlock {
        block_id: "cols".to_string(),
    }
    .apply(&doc)?;

    assert!(!doc.contains_id("cols"));
    assert!(!doc.contains_id("inner"));
    assert!(!doc.contains_id("deep"));
    assert!(doc.zones.is_empty());
    assert_eq!(doc.content.len(), 1);
    Ok(())
}

#[test]
fn test_remove_unknown_block() {
    let result = Mutation::RemoveBlock {
        block_id: "missing".to_string(),
    }
    .apply(&columns_page());
    assert_eq!(result, Err(MutationError::BlockNotFound("missing".to_string())));
}

#[test]
fn test_update_props_merges_top_level() -> anyhow::Result<()> {
    let doc = Document::new().append_block(BlockInstance::new(
        "HeadingBlock",
        build_default_props_with_id("HeadingBlock"),
    ));
    let id = doc.content[0].id().unwrap().to_string();

    let mut props = PropertyMap::new();
    props.insert("title".to_string(), json!("Changed"));
    let next = Mutation::UpdateProps {
        block_id: id.clone(),
        props,
    }
    .apply(&doc)?;

    let block = next.find_block(&id).unwrap();
    assert_eq!(block.props["title"], "Changed");
    assert_eq!(block.props["level"], "h2");
    assert_eq!(doc.find_block(&id).unwrap().props["title"], "Welcome to your page");
    Ok(())
}

#[test]
fn test_set_root_props() -> anyhow::Result<()> {
    let props = props_from_value(json!({ "title": "About", "description": "Who we are" })).unwrap();
    let doc = Mutation::SetRootProps { props }.apply(&columns_page())?;

    assert_eq!(doc.title(), Some("About"));
    assert_eq!(doc.root.props["description"], "Who we are");
    Ok(())
}

#[test]
fn test_replace_document_rejects_duplicate_ids() {
    let replacement = Document::new()
        .append_block(with_id("TextBlock", "same"))
        .append_block(with_id("TextBlock", "same"));

    let result = Mutation::ReplaceDocument {
        document: replacement,
    }
    .apply(&columns_page());
    assert_eq!(result, Err(MutationError::DuplicateId("same".to_string())));
}

#[test]
fn test_save_and_load() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("index.json");

    let doc = columns_page();
    doc.save(&path)?;
    let loaded = Document::load(&path)?;

    assert_eq!(doc, loaded);
    Ok(())
}
