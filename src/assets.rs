//! Asset loading
//!
//! The host supplies a loader that turns every object kind into something
//! it can draw (an image, a sprite index, a color). The game is only built
//! once every kind in the catalog has a handle.

use std::collections::HashMap;
use std::future::Future;

use crate::error::AssetLoadError;
use crate::sim::{CatalogEntry, ObjectKind};

/// Drawable handle per object kind
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMap<H> {
    handles: HashMap<ObjectKind, H>,
}

impl<H> Default for AssetMap<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> AssetMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ObjectKind, handle: H) {
        self.handles.insert(kind, handle);
    }

    pub fn get(&self, kind: ObjectKind) -> Option<&H> {
        self.handles.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Fail on the first kind without a handle
    pub fn ensure_complete(&self, kinds: &[ObjectKind]) -> Result<(), AssetLoadError> {
        match kinds.iter().find(|k| !self.handles.contains_key(*k)) {
            Some(&kind) => Err(AssetLoadError::Missing(kind)),
            None => Ok(()),
        }
    }
}

impl<H> FromIterator<(ObjectKind, H)> for AssetMap<H> {
    fn from_iter<I: IntoIterator<Item = (ObjectKind, H)>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

/// Bulk asset loader supplied by the host
pub trait AssetLoader {
    type Handle;

    /// Load a handle for every requested kind
    fn load_all(
        &self,
        kinds: &[ObjectKind],
    ) -> impl Future<Output = Result<AssetMap<Self::Handle>, AssetLoadError>>;
}

/// Distinct kinds in catalog order
pub fn catalog_kinds(catalog: &[CatalogEntry]) -> Vec<ObjectKind> {
    let mut kinds: Vec<ObjectKind> = Vec::with_capacity(catalog.len());
    for entry in catalog {
        if !kinds.contains(&entry.kind) {
            kinds.push(entry.kind);
        }
    }
    kinds
}

/// Load and check assets for a catalog
pub async fn load_catalog_assets<L: AssetLoader>(
    loader: &L,
    catalog: &[CatalogEntry],
) -> Result<AssetMap<L::Handle>, AssetLoadError> {
    let kinds = catalog_kinds(catalog);
    let assets = loader.load_all(&kinds).await?;
    assets.ensure_complete(&kinds)?;
    log::info!("Loaded {} assets", assets.len());
    Ok(assets)
}

/// Flat fill colors for hosts without sprites
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAssets;

impl ColorAssets {
    pub fn color(kind: ObjectKind) -> &'static str {
        match kind {
            ObjectKind::Apple => "#ff6347",
            ObjectKind::Orange => "#ffa500",
            ObjectKind::Cherry => "#c2185b",
            ObjectKind::Watermelon => "#2e7d32",
            ObjectKind::RottenApple => "#6d4c41",
            ObjectKind::Bomb => "#212121",
        }
    }
}

impl AssetLoader for ColorAssets {
    type Handle = &'static str;

    async fn load_all(
        &self,
        kinds: &[ObjectKind],
    ) -> Result<AssetMap<Self::Handle>, AssetLoadError> {
        Ok(kinds.iter().map(|&k| (k, Self::color(k))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DEFAULT_CATALOG;

    /// Loads everything except one kind
    struct Flaky(ObjectKind);

    impl AssetLoader for Flaky {
        type Handle = u32;

        async fn load_all(&self, kinds: &[ObjectKind]) -> Result<AssetMap<u32>, AssetLoadError> {
            Ok(kinds
                .iter()
                .enumerate()
                .filter(|(_, k)| **k != self.0)
                .map(|(i, &k)| (k, i as u32))
                .collect())
        }
    }

    #[test]
    fn test_color_assets_cover_catalog() {
        let assets =
            pollster::block_on(load_catalog_assets(&ColorAssets, &DEFAULT_CATALOG)).unwrap();
        assert_eq!(assets.len(), DEFAULT_CATALOG.len());
        assert_eq!(assets.get(ObjectKind::Apple), Some(&"#ff6347"));
    }

    #[test]
    fn test_missing_asset_fails() {
        let result = pollster::block_on(load_catalog_assets(
            &Flaky(ObjectKind::Bomb),
            &DEFAULT_CATALOG,
        ));
        assert_eq!(result, Err(AssetLoadError::Missing(ObjectKind::Bomb)));
    }

    #[test]
    fn test_catalog_kinds_dedups() {
        let catalog = [DEFAULT_CATALOG[0], DEFAULT_CATALOG[5], DEFAULT_CATALOG[0]];
        assert_eq!(catalog_kinds(&catalog), vec![ObjectKind::Apple, ObjectKind::Bomb]);
    }
}
