//! HTTP routes.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use demesne_core::{
    dto::NewExample,
    types::{Creature, Example, Spell},
};
use log::info;
use std::sync::Arc;

use crate::{catalog::Catalog, error::ApiError};

pub type SharedCatalog = Arc<dyn Catalog>;

pub fn routes() -> Router<SharedCatalog> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/creatures", get(list_creatures).post(create_creature))
        .route("/api/spells", get(list_spells).post(create_spell))
        .route("/api/examples", get(list_examples).post(create_example))
}

/// Milliseconds since the Unix epoch.
fn timestamp_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

async fn health() -> &'static str {
    "OK"
}

async fn list_creatures(
    State(catalog): State<SharedCatalog>,
) -> Result<Json<Vec<Creature>>, ApiError> {
    let creatures = catalog
        .creatures()
        .await
        .map_err(|source| ApiError::Fetch {
            resource: "creatures",
            source,
        })?;
    info!("Serving {} creatures", creatures.len());
    Ok(Json(creatures))
}

async fn create_creature(Json(creature): Json<Creature>) -> (StatusCode, Json<Creature>) {
    let creature = Creature {
        id: timestamp_id(),
        ..creature
    };
    info!("Created creature {} ({})", creature.name, creature.id);
    (StatusCode::CREATED, Json(creature))
}

async fn list_spells(State(catalog): State<SharedCatalog>) -> Result<Json<Vec<Spell>>, ApiError> {
    let spells = catalog.spells().await.map_err(|source| ApiError::Fetch {
        resource: "spells",
        source,
    })?;
    info!("Serving {} spells", spells.len());
    Ok(Json(spells))
}

async fn create_spell(Json(spell): Json<Spell>) -> (StatusCode, Json<Spell>) {
    let spell = Spell {
        id: timestamp_id(),
        ..spell
    };
    info!("Created spell {} ({})", spell.name, spell.id);
    (StatusCode::CREATED, Json(spell))
}

async fn list_examples(
    State(catalog): State<SharedCatalog>,
) -> Result<Json<Vec<Example>>, ApiError> {
    let examples = catalog.examples().await.map_err(|source| ApiError::Fetch {
        resource: "examples",
        source,
    })?;
    Ok(Json(examples))
}

async fn create_example(Json(example): Json<NewExample>) -> (StatusCode, Json<Example>) {
    let example = Example {
        id: timestamp_id(),
        name: example.name,
        description: example.description,
    };
    (StatusCode::CREATED, Json(example))
}
