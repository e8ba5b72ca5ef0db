//! # Document Mutations
//!
//! Structural edits on a page document.
//!
//! ## Design Principles
//!
//! 1. **Pure**: `apply` returns a new document; the input is never touched
//! 2. **Validated**: ids, zones and containment are checked before anything changes
//! 3. **Shallow merges**: prop updates replace top-level keys only
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Relocates a block (and the zones it owns) to a new location
//! - Fails if the destination is a zone owned by the block or one of its descendants
//! - Index is clamped to the destination length after removal
//!
//! ### Remove
//! - Removes the block and every zone it owns, recursively
//!
//! ### UpdateProps
//! - Merges top-level keys; the instance id cannot change

use crate::document::{BlockInstance, Document, ZoneId};
use pagewright_schema::{palette, PropertyMap, ID_PROP};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Where a block sits: the top-level content or a named zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Root,
    Zone(String),
}

impl Location {
    pub fn zone(block_id: &str, zone: &str) -> Self {
        Location::Zone(ZoneId::new(block_id, zone).key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Append to the end of the top-level content
    AppendBlock { block: BlockInstance },

    InsertBlock {
        destination: Location,
        index: usize,
        block: BlockInstance,
    },

    MoveBlock {
        block_id: String,
        destination: Location,
        index: usize,
    },

    /// Remove a block and everything placed inside it
    RemoveBlock { block_id: String },

    UpdateProps { block_id: String, props: PropertyMap },

    SetRootProps { props: PropertyMap },

    ReplaceDocument { document: Document },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Duplicate block id: {0}")]
    DuplicateId(String),

    #[error("Block of type {0} has no id")]
    MissingId(String),

    #[error("Would place a block inside itself")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Mutation {
    /// Validate, then return the edited copy
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        if let Err(err) = self.validate(doc) {
            tracing::debug!(%err, "mutation rejected");
            return Err(err);
        }

        let mut next = doc.clone();
        match self {
            Mutation::AppendBlock { block } => {
                next.content.push(block.clone());
            }

            Mutation::InsertBlock {
                destination,
                index,
                block,
            } => {
                insert_at(&mut next, destination, *index, block.clone());
            }

            Mutation::MoveBlock {
                block_id,
                destination,
                index,
            } => {
                let block = take_block(&mut next, block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                insert_at(&mut next, destination, *index, block);
            }

            Mutation::RemoveBlock { block_id } => {
                let owned = owned_zone_keys(doc, block_id);
                take_block(&mut next, block_id);
                for key in owned {
                    next.zones.remove(&key);
                }
            }

            Mutation::UpdateProps { block_id, props } => {
                let block = find_block_mut(&mut next, block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                merge(&mut block.props, props);
            }

            Mutation::SetRootProps { props } => {
                merge(&mut next.root.props, props);
            }

            Mutation::ReplaceDocument { document } => {
                next = document.clone();
            }
        }

        Ok(next)
    }

    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::AppendBlock { block } => validate_new_block(doc, block),

            Mutation::InsertBlock {
                destination, block, ..
            } => {
                validate_new_block(doc, block)?;
                validate_destination(doc, destination)
            }

            Mutation::MoveBlock {
                block_id,
                destination,
                ..
            } => {
                if !doc.contains_id(block_id) {
                    return Err(MutationError::BlockNotFound(block_id.clone()));
                }
                validate_destination(doc, destination)?;
                if let Location::Zone(key) = destination {
                    if owned_zone_keys(doc, block_id).contains(key) {
                        return Err(MutationError::CycleDetected);
                    }
                }
                Ok(())
            }

            Mutation::RemoveBlock { block_id } => {
                if doc.contains_id(block_id) {
                    Ok(())
                } else {
                    Err(MutationError::BlockNotFound(block_id.clone()))
                }
            }

            Mutation::UpdateProps { block_id, props } => {
                if !doc.contains_id(block_id) {
                    return Err(MutationError::BlockNotFound(block_id.clone()));
                }
                match props.get(ID_PROP) {
                    Some(Value::String(id)) if id == block_id => Ok(()),
                    Some(_) => Err(MutationError::InvalidStructure(format!(
                        "cannot change the id of {}",
                        block_id
                    ))),
                    None => Ok(()),
                }
            }

            Mutation::SetRootProps { .. } => Ok(()),

            Mutation::ReplaceDocument { document } => match document.duplicate_ids().first() {
                Some(id) => Err(MutationError::DuplicateId(id.clone())),
                None => Ok(()),
            },
        }
    }
}

fn validate_new_block(doc: &Document, block: &BlockInstance) -> Result<(), MutationError> {
    let id = block
        .id()
        .ok_or_else(|| MutationError::MissingId(block.block_type.clone()))?;
    if doc.contains_id(id) {
        return Err(MutationError::DuplicateId(id.to_string()));
    }
    Ok(())
}

/// A zone exists once it has an entry, or when a block in the document owns it
fn validate_destination(doc: &Document, destination: &Location) -> Result<(), MutationError> {
    let key = match destination {
        Location::Root => return Ok(()),
        Location::Zone(key) => key,
    };
    if doc.zones.contains_key(key) {
        return Ok(());
    }

    let owned = ZoneId::parse(key).and_then(|zone| {
        let owner = doc.find_block(&zone.block_id)?;
        palette::zone_names(&owner.block_type, &owner.props)
            .iter()
            .any(|name| *name == zone.zone)
            .then_some(())
    });
    owned.ok_or_else(|| MutationError::ZoneNotFound(key.clone()))
}

fn insert_at(doc: &mut Document, destination: &Location, index: usize, block: BlockInstance) {
    let blocks = match destination {
        Location::Root => &mut doc.content,
        Location::Zone(key) => doc.zones.entry(key.clone()).or_default(),
    };
    let index = index.min(blocks.len());
    blocks.insert(index, block);
}

fn take_block(doc: &mut Document, id: &str) -> Option<BlockInstance> {
    if let Some(pos) = doc.content.iter().position(|b| b.id() == Some(id)) {
        return Some(doc.content.remove(pos));
    }
    doc.zones.values_mut().find_map(|blocks| {
        let pos = blocks.iter().position(|b| b.id() == Some(id))?;
        Some(blocks.remove(pos))
    })
}

fn find_block_mut<'a>(doc: &'a mut Document, id: &str) -> Option<&'a mut BlockInstance> {
    doc.content
        .iter_mut()
        .chain(doc.zones.values_mut().flat_map(|blocks| blocks.iter_mut()))
        .find(|b| b.id() == Some(id))
}

/// Zone keys owned by `block_id` and, transitively, by the blocks inside them
fn owned_zone_keys(doc: &Document, block_id: &str) -> HashSet<String> {
    let mut owned = HashSet::new();
    let mut pending = vec![block_id.to_string()];
    let mut visited = HashSet::new();

    while let Some(owner) = pending.pop() {
        if !visited.insert(owner.clone()) {
            continue;
        }
        let mut keys: Vec<String> = doc
            .zones
            .keys()
            .filter(|key| ZoneId::parse(key).is_some_and(|zone| zone.block_id == owner))
            .cloned()
            .collect();
        if let Some(block) = doc.find_block(&owner) {
            keys.extend(block.zone_ids().into_iter().map(|zone| zone.key()));
        }

        for key in keys {
            if let Some(blocks) = doc.zones.get(&key) {
                pending.extend(blocks.iter().filter_map(BlockInstance::id).map(str::to_string));
            }
            owned.insert(key);
        }
    }

    owned
}

fn merge(target: &mut PropertyMap, updates: &PropertyMap) {
    for (key, value) in updates {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(block_type: &str, id: &str) -> BlockInstance {
        let mut props = PropertyMap::new();
        props.insert(ID_PROP.to_string(), json!(id));
        BlockInstance::new(block_type, props)
    }

    #[test]
    fn test_append_requires_id() {
        let doc = Document::new();
        let result = Mutation::AppendBlock {
            block: BlockInstance::new("TextBlock", PropertyMap::new()),
        }
        .apply(&doc);
        assert_eq!(result, Err(MutationError::MissingId("TextBlock".to_string())));
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let doc = Document::new().append_block(block("TextBlock", "t1"));
        let result = Mutation::AppendBlock {
            block: block("HeadingBlock", "t1"),
        }
        .apply(&doc);
        assert_eq!(result, Err(MutationError::DuplicateId("t1".to_string())));
    }

    #[test]
    fn test_insert_into_owned_zone_without_entry() {
        let doc = Document::new().append_block(block("ContainerBlock", "box"));
        let next = Mutation::InsertBlock {
            destination: Location::zone("box", "container-content"),
            index: 5,
            block: block("TextBlock", "t1"),
        }
        .apply(&doc)
        .unwrap();

        assert_eq!(next.zones["box:container-content"].len(), 1);
        assert!(doc.zones.is_empty());
    }

    #[test]
    fn test_insert_into_unknown_zone_fails() {
        let doc = Document::new().append_block(block("TextBlock", "t1"));
        let result = Mutation::InsertBlock {
            destination: Location::zone("t1", "column-0"),
            index: 0,
            block: block("TextBlock", "t2"),
        }
        .apply(&doc);
        assert_eq!(
            result,
            Err(MutationError::ZoneNotFound("t1:column-0".to_string()))
        );
    }

    #[test]
    fn test_update_props_cannot_change_id() {
        let doc = Document::new().append_block(block("TextBlock", "t1"));
        let mut props = PropertyMap::new();
        props.insert(ID_PROP.to_string(), json!("t2"));

        let result = Mutation::UpdateProps {
            block_id: "t1".to_string(),
            props,
        }
        .apply(&doc);
        assert!(matches!(result, Err(MutationError::InvalidStructure(_))));
    }
}
