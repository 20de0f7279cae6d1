//! Immutable, pre-normalized catalog index.

use std::collections::{BTreeMap, HashMap};

use super::item::{CatalogItem, Category, ItemId, Recipe, WeaponType};
use crate::error::{BuildForgeError, Result};

/// Read-only snapshot of every candidate object and recipe.
///
/// Lookups by id, category and weapon type are precomputed. Category and
/// type lists preserve insertion order so that iteration is deterministic.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{Catalog, CatalogItem, Category, ItemId};
///
/// let catalog = Catalog::new(vec![
///     CatalogItem::new(1, "Leather Cap", Category::Helmet),
///     CatalogItem::new(2, "Leather Boots", Category::Boots),
/// ], vec![]).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(ItemId(2)).unwrap().name, "Leather Boots");
/// assert_eq!(catalog.by_category(Category::Helmet).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    by_id: HashMap<ItemId, usize>,
    by_category: BTreeMap<Category, Vec<usize>>,
    by_weapon_type: BTreeMap<WeaponType, Vec<usize>>,
    recipes: BTreeMap<String, Recipe>,
}

impl Catalog {
    /// Builds the index. Fails on duplicate item ids or recipe names.
    pub fn new(items: Vec<CatalogItem>, recipes: Vec<Recipe>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_category: BTreeMap<Category, Vec<usize>> = BTreeMap::new();
        let mut by_weapon_type: BTreeMap<WeaponType, Vec<usize>> = BTreeMap::new();

        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.id, idx).is_some() {
                return Err(BuildForgeError::DuplicateItem(item.id));
            }
            by_category.entry(item.category).or_default().push(idx);
            if let Some(w) = item.weapon_type {
                by_weapon_type.entry(w).or_default().push(idx);
            }
        }

        let mut recipe_map = BTreeMap::new();
        for recipe in recipes {
            let name = recipe.name.clone();
            if recipe_map.insert(name.clone(), recipe).is_some() {
                return Err(BuildForgeError::DuplicateRecipe(name));
            }
        }

        Ok(Self {
            items,
            by_id,
            by_category,
            by_weapon_type,
            recipes: recipe_map,
        })
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Items of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.items[idx])
    }

    /// Weapons of one type, in catalog order.
    pub fn by_weapon_type(&self, weapon_type: WeaponType) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.by_weapon_type
            .get(&weapon_type)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.items[idx])
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.recipes.values()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
