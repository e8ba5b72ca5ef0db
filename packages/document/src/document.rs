//! # Page Document
//!
//! Persisted format:
//!
//! ```json
//! {
//!   "content": [{ "type": "HeadingBlock", "props": { "id": "HeadingBlock-1", "title": "Hi" } }],
//!   "root": { "props": { "title": "Home" } },
//!   "zones": { "ColumnsBlock-2:column-0": [] }
//! }
//! ```
//!
//! Zone keys are `<owner block id>:<zone name>`.

use crate::DocumentError;
use pagewright_schema::{instance_id, palette, PropertyMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

/// One placement of a block type on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub props: PropertyMap,
}

/// Page-level properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    #[serde(default)]
    pub props: PropertyMap,
}

/// The page: top-level content, container zones and root props
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub content: Vec<BlockInstance>,
    #[serde(default)]
    pub root: RootData,
    #[serde(default)]
    pub zones: BTreeMap<String, Vec<BlockInstance>>,
}

/// Compound zone key: owning block id plus zone name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId {
    pub block_id: String,
    pub zone: String,
}

impl ZoneId {
    pub fn new(block_id: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            zone: zone.into(),
        }
    }

    /// Split a `<block id>:<zone>` key
    pub fn parse(key: &str) -> Option<Self> {
        let (block_id, zone) = key.rsplit_once(':')?;
        if block_id.is_empty() || zone.is_empty() {
            return None;
        }
        Some(Self::new(block_id, zone))
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_id, self.zone)
    }
}

impl BlockInstance {
    pub fn new(block_type: impl Into<String>, props: PropertyMap) -> Self {
        Self {
            block_type: block_type.into(),
            props,
        }
    }

    /// Instance id, if set
    pub fn id(&self) -> Option<&str> {
        instance_id(&self.props)
    }

    /// Zones this block owns, given its type and props
    pub fn zone_ids(&self) -> Vec<ZoneId> {
        match self.id() {
            Some(id) => palette::zone_names(&self.block_type, &self.props)
                .into_iter()
                .map(|zone| ZoneId::new(id, zone))
                .collect(),
            None => vec![],
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty page with a title root prop
    pub fn with_title(title: &str) -> Self {
        let mut doc = Self::new();
        doc.root
            .props
            .insert("title".to_string(), Value::String(title.to_string()));
        doc
    }

    pub fn title(&self) -> Option<&str> {
        self.root.props.get("title").and_then(Value::as_str)
    }

    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Read a persisted document
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Write the persisted format to disk
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Copy of this document with `block` appended to the top-level content
    pub fn append_block(&self, block: BlockInstance) -> Document {
        let mut next = self.clone();
        next.content.push(block);
        next
    }

    /// Wholesale replacement, used when another copy supersedes this one
    pub fn replace_document(&self, next: Document) -> Document {
        next
    }

    /// Every block, top level first, then zones in key order
    pub fn blocks(&self) -> impl Iterator<Item = &BlockInstance> {
        self.content
            .iter()
            .chain(self.zones.values().flat_map(|blocks| blocks.iter()))
    }

    pub fn len(&self) -> usize {
        self.blocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.zones.values().all(Vec::is_empty)
    }

    pub fn find_block(&self, id: &str) -> Option<&BlockInstance> {
        self.blocks().find(|b| b.id() == Some(id))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_block(id).is_some()
    }

    /// Blocks placed in a zone; empty when the zone has no entry
    pub fn zone(&self, zone: &ZoneId) -> &[BlockInstance] {
        self.zones
            .get(&zone.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids that occur more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.blocks().filter_map(BlockInstance::id) {
            if !seen.insert(id) && !duplicates.iter().any(|d| d == id) {
                duplicates.push(id.to_string());
            }
        }
        duplicates
    }

    /// Copy with an empty entry for every zone a container block owns
    pub fn ensure_zones(&self) -> Document {
        let mut next = self.clone();
        let keys: Vec<String> = self
            .blocks()
            .flat_map(BlockInstance::zone_ids)
            .map(|zone| zone.key())
            .collect();
        for key in keys {
            next.zones.entry(key).or_default();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_schema::props_from_value;
    use serde_json::json;

    fn block(block_type: &str, id: &str) -> BlockInstance {
        BlockInstance::new(block_type, props_from_value(json!({ "id": id })).unwrap())
    }

    #[test]
    fn test_append_block_leaves_input_untouched() {
        let doc = Document::with_title("Home");
        let next = doc.append_block(block("HeadingBlock", "h1"));

        assert!(doc.content.is_empty());
        assert_eq!(next.content.len(), 1);
        assert_eq!(next.content[0].block_type, "HeadingBlock");
        assert_eq!(next.title(), Some("Home"));
    }

    #[test]
    fn test_zone_id_round_trip() {
        let zone = ZoneId::new("ColumnsBlock-1", "column-0");
        assert_eq!(zone.key(), "ColumnsBlock-1:column-0");
        assert_eq!(ZoneId::parse("ColumnsBlock-1:column-0"), Some(zone));
        assert_eq!(ZoneId::parse("no-separator"), None);
        assert_eq!(ZoneId::parse(":zone"), None);
    }

    #[test]
    fn test_ensure_zones_creates_empty_entries() {
        let mut columns = block("ColumnsBlock", "cols");
        columns.props.insert("columns".to_string(), json!(3));
        let doc = Document::new().append_block(columns).ensure_zones();

        assert_eq!(doc.zones.len(), 3);
        assert!(doc.zones["cols:column-2"].is_empty());
    }

    #[test]
    fn test_ensure_zones_keeps_existing_content() {
        let mut doc = Document::new().append_block(block("ContainerBlock", "box"));
        doc.zones.insert(
            "box:container-content".to_string(),
            vec![block("TextBlock", "t1")],
        );

        let doc = doc.ensure_zones();
        assert_eq!(doc.zone(&ZoneId::new("box", "container-content")).len(), 1);
    }

    #[test]
    fn test_duplicate_ids() {
        let mut doc = Document::new()
            .append_block(block("TextBlock", "a"))
            .append_block(block("TextBlock", "b"))
            .append_block(block("TextBlock", "a"));
        doc.zones.insert("x:column-0".to_string(), vec![block("TextBlock", "b")]);

        assert_eq!(doc.duplicate_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_keys_in_props_survive_round_trip() {
        let json = r#"{
            "content": [{ "type": "FutureBlock", "props": { "id": "f1", "shiny": { "deep": [1, 2] } } }],
            "root": { "props": {} }
        }"#;

        let doc = Document::from_json(json).unwrap();
        assert!(doc.zones.is_empty());

        let again = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(doc, again);
        assert_eq!(again.content[0].props["shiny"]["deep"][1], 2);
    }
}
