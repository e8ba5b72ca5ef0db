use serde::{Deserialize, Serialize};

/// A palette group and the block types it contains, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub components: Vec<String>,
}

impl Category {
    pub fn new(id: &str, title: &str, components: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            components: components.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.components.iter().any(|c| c == type_id)
    }
}

/// Where a newly loaded block type belongs in the palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlacement {
    pub id: String,
    pub title: String,
}

/// Ordered category id → member list mapping.
///
/// Only renderable block types are members; stubs join their category
/// when they are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut index = Self::new();
        for category in categories {
            for member in &category.components {
                index.insert_member(
                    &CategoryPlacement {
                        id: category.id.clone(),
                        title: category.title.clone(),
                    },
                    member,
                );
            }
            if index.get(&category.id).is_none() {
                index.categories.push(Category {
                    components: vec![],
                    ..category
                });
            }
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Append `type_id` to the placement's category, creating the category
    /// if needed. Returns false when the type was already a member.
    pub fn insert_member(&mut self, placement: &CategoryPlacement, type_id: &str) -> bool {
        let position = match self.categories.iter().position(|c| c.id == placement.id) {
            Some(position) => position,
            None => {
                self.categories.push(Category {
                    id: placement.id.clone(),
                    title: placement.title.clone(),
                    components: vec![],
                });
                self.categories.len() - 1
            }
        };

        let category = &mut self.categories[position];
        if category.contains(type_id) {
            return false;
        }
        category.components.push(type_id.to_string());
        true
    }

    /// The category a block type is listed under
    pub fn category_of(&self, type_id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.contains(type_id))
            .map(|c| c.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Category> {
        self.categories.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(id: &str) -> CategoryPlacement {
        CategoryPlacement {
            id: id.to_string(),
            title: id.to_uppercase(),
        }
    }

    #[test]
    fn test_insert_member_is_idempotent() {
        let mut index = CategoryIndex::new();

        assert!(index.insert_member(&placement("marketing"), "HeroBlock"));
        assert!(!index.insert_member(&placement("marketing"), "HeroBlock"));

        let category = index.get("marketing").unwrap();
        assert_eq!(category.components, vec!["HeroBlock"]);
        assert_eq!(category.title, "MARKETING");
    }

    #[test]
    fn test_insert_member_preserves_order() {
        let mut index = CategoryIndex::from_categories(vec![Category::new(
            "typography",
            "Typography",
            &["HeadingBlock", "TextBlock"],
        )]);

        index.insert_member(&placement("typography"), "QuoteBlock");

        assert_eq!(
            index.get("typography").unwrap().components,
            vec!["HeadingBlock", "TextBlock", "QuoteBlock"]
        );
        assert_eq!(index.category_of("QuoteBlock"), Some("typography"));
    }

    #[test]
    fn test_from_categories_dedupes_and_keeps_empty() {
        let index = CategoryIndex::from_categories(vec![
            Category::new("forms", "Forms", &["InputBlock", "InputBlock"]),
            Category::new("empty", "Empty", &[]),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("forms").unwrap().components, vec!["InputBlock"]);
        assert!(index.get("empty").unwrap().components.is_empty());
    }
}
