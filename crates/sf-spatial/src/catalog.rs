//! Item-name lookup built once per run.
//!
//! Maps a lowercase product name to the shelf stocking it.  When two shelves
//! stock a product with the same name the first shelf in layout order wins.

use rustc_hash::FxHashMap;
use tracing::warn;

use sf_core::ShelfId;

use crate::{ProductInfo, Shelf, StoreLayout};

/// Where a shopping-list item can be found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub shelf:   ShelfId,
    /// Index into `Shelf::products`.
    pub product: usize,
}

/// Case-insensitive product-name index over the placed shelves.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: FxHashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn build(layout: &StoreLayout, placed: &[ShelfId]) -> Self {
        let mut entries: FxHashMap<String, CatalogEntry> = FxHashMap::default();
        for &shelf in placed {
            for (product, info) in layout.shelf(shelf).products.iter().enumerate() {
                let key = info.name.trim().to_lowercase();
                match entries.get(&key) {
                    Some(first) => warn!(
                        product = %info.name,
                        kept = %first.shelf,
                        ignored = %shelf,
                        "duplicate product name; first shelf wins"
                    ),
                    None => {
                        entries.insert(key, CatalogEntry { shelf, product });
                    }
                }
            }
        }
        Self { entries }
    }

    /// Look up a shopping-list item by name, ignoring case and surrounding
    /// whitespace.
    pub fn resolve(&self, item: &str) -> Option<CatalogEntry> {
        self.entries.get(&item.trim().to_lowercase()).copied()
    }

    /// Resolve straight to the shelf and product records.
    pub fn lookup<'a>(&self, layout: &'a StoreLayout, item: &str) -> Option<(&'a Shelf, &'a ProductInfo)> {
        let entry = self.resolve(item)?;
        let shelf = layout.shelf(entry.shelf);
        Some((shelf, &shelf.products[entry.product]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
