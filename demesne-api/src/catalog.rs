use async_trait::async_trait;
use demesne_core::{
    fixtures,
    transform::{transform_monster, transform_spell, ApiReference},
    types::{Creature, Example, Spell},
};
use futures::future::join_all;
use log::{info, warn};
use rand::seq::IndexedRandom;
use std::sync::Arc;

use crate::{
    error::CatalogError,
    upstream::{DndApi, Resource},
};

/// Source of the listings served by the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn creatures(&self) -> Result<Vec<Creature>, CatalogError>;
    async fn spells(&self) -> Result<Vec<Spell>, CatalogError>;
    async fn examples(&self) -> Result<Vec<Example>, CatalogError>;
}

/// Fixed in-memory data, used when running without the upstream API.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    creatures: Vec<Creature>,
    spells: Vec<Spell>,
    examples: Vec<Example>,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self {
            creatures: fixtures::creatures(),
            spells: fixtures::spells(),
            examples: fixtures::examples(),
        }
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn creatures(&self) -> Result<Vec<Creature>, CatalogError> {
        Ok(self.creatures.clone())
    }

    async fn spells(&self) -> Result<Vec<Spell>, CatalogError> {
        Ok(self.spells.clone())
    }

    async fn examples(&self) -> Result<Vec<Example>, CatalogError> {
        Ok(self.examples.clone())
    }
}

/// Serves a random sample of the upstream API on every request.
pub struct UpstreamCatalog {
    api: Arc<dyn DndApi>,
    sample_size: usize,
    examples: Vec<Example>,
}

impl UpstreamCatalog {
    pub fn new(api: Arc<dyn DndApi>, sample_size: usize) -> Self {
        Self {
            api,
            sample_size,
            examples: fixtures::examples(),
        }
    }

    fn sample(&self, references: &[ApiReference]) -> Vec<ApiReference> {
        let mut rng = rand::rng();
        references
            .choose_multiple(&mut rng, self.sample_size)
            .cloned()
            .collect()
    }
}

/// Keeps the successful fetches, logging and dropping the rest.
fn keep_successful<T>(
    kind: &str,
    picked: &[ApiReference],
    results: Vec<Result<T, CatalogError>>,
) -> Vec<T> {
    picked
        .iter()
        .zip(results)
        .filter_map(|(reference, result)| match result {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Error fetching {kind} '{}': {e}", reference.index);
                None
            }
        })
        .collect()
}

#[async_trait]
impl Catalog for UpstreamCatalog {
    async fn creatures(&self) -> Result<Vec<Creature>, CatalogError> {
        let references = self.api.list(Resource::Monsters).await?;
        let picked = self.sample(&references);
        info!(
            "Fetching {} of {} monsters",
            picked.len(),
            references.len()
        );
        let results = join_all(picked.iter().map(|r| self.api.monster(&r.index))).await;
        Ok(keep_successful("monster", &picked, results)
            .iter()
            .map(transform_monster)
            .collect())
    }

    async fn spells(&self) -> Result<Vec<Spell>, CatalogError> {
        let references = self.api.list(Resource::Spells).await?;
        let picked = self.sample(&references);
        info!("Fetching {} of {} spells", picked.len(), references.len());
        let results = join_all(picked.iter().map(|r| self.api.spell(&r.index))).await;
        Ok(keep_successful("spell", &picked, results)
            .iter()
            .map(transform_spell)
            .collect())
    }

    async fn examples(&self) -> Result<Vec<Example>, CatalogError> {
        Ok(self.examples.clone())
    }
}
