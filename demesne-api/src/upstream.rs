//! Client for the public D&D 5e REST API.

use async_trait::async_trait;
use demesne_core::transform::{ApiReference, MonsterApiResponse, SpellApiResponse};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::CatalogError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://www.dnd5eapi.co";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Monsters,
    Spells,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Monsters => "/api/monsters",
            Resource::Spells => "/api/spells",
        }
    }
}

/// The subset of the upstream API the catalog needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DndApi: Send + Sync {
    /// The `results` array of a list endpoint.
    async fn list(&self, resource: Resource) -> Result<Vec<ApiReference>, CatalogError>;
    async fn monster(&self, index: &str) -> Result<MonsterApiResponse, CatalogError>;
    async fn spell(&self, index: &str) -> Result<SpellApiResponse, CatalogError>;
}

#[derive(Clone)]
pub struct HttpDndApi {
    client: Client,
    base_url: String,
}

impl HttpDndApi {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DndApi for HttpDndApi {
    async fn list(&self, resource: Resource) -> Result<Vec<ApiReference>, CatalogError> {
        let body: serde_json::Value = self.get(resource.path()).await?;
        let results = body
            .get("results")
            .filter(|r| r.is_array())
            .cloned()
            .ok_or(CatalogError::InvalidListFormat)?;
        Ok(serde_json::from_value(results)?)
    }

    async fn monster(&self, index: &str) -> Result<MonsterApiResponse, CatalogError> {
        self.get(&format!("{}/{}", Resource::Monsters.path(), index))
            .await
    }

    async fn spell(&self, index: &str) -> Result<SpellApiResponse, CatalogError> {
        self.get(&format!("{}/{}", Resource::Spells.path(), index))
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral local port and returns its base url.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn monster_detail(Path(index): Path<String>) -> Result<Json<Value>, StatusCode> {
        match index.as_str() {
            "goblin" | "owlbear" => Ok(Json(json!({
                "index": index,
                "name": index.to_uppercase(),
                "armor_class": [{ "type": "natural", "value": 12 }],
                "hit_points": 7,
                "speed": { "walk": "30 ft." },
                "dexterity": 14,
                "senses": { "darkvision": "60 ft.", "passive_perception": 9 },
                "languages": "Common, Goblin",
                "challenge_rating": 0.25,
                "xp": 50
            }))),
            "garbled" => Ok(Json(json!({ "index": index, "hit_points": "lots" }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    pub(crate) fn fake_upstream() -> Router {
        Router::new()
            .route(
                "/api/monsters",
                get(|| async {
                    Json(json!({
                        "count": 4,
                        "results": [
                            { "index": "goblin", "name": "Goblin", "url": "/api/monsters/goblin" },
                            { "index": "owlbear", "name": "Owlbear", "url": "/api/monsters/owlbear" },
                            { "index": "missing", "name": "Missing", "url": "/api/monsters/missing" },
                            { "index": "garbled", "name": "Garbled", "url": "/api/monsters/garbled" }
                        ]
                    }))
                }),
            )
            .route("/api/monsters/{index}", get(monster_detail))
            .route(
                "/api/spells",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
    }

    #[tokio::test]
    async fn test_list_returns_results() {
        let api = HttpDndApi::new(&serve(fake_upstream()).await);
        let results = api.list(Resource::Monsters).await.unwrap();
        let indices: Vec<&str> = results.iter().map(|r| r.index.as_str()).collect();
        assert_eq!(indices, vec!["goblin", "owlbear", "missing", "garbled"]);
    }

    #[tokio::test]
    async fn test_list_status_error() {
        let api = HttpDndApi::new(&serve(fake_upstream()).await);
        let err = api.list(Resource::Spells).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API responded with status: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_list_without_results_array() {
        let router = Router::new().route(
            "/api/monsters",
            get(|| async { Json(json!({ "invalid": "format" })) }),
        );
        let api = HttpDndApi::new(&serve(router).await);
        let err = api.list(Resource::Monsters).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid API response format: missing or invalid results array"
        );
    }

    #[tokio::test]
    async fn test_monster_detail_and_not_found() {
        let base = serve(fake_upstream()).await;
        let api = HttpDndApi::new(&format!("{base}/"));
        let goblin = api.monster("goblin").await.unwrap();
        assert_eq!(goblin.name, "GOBLIN");
        assert_eq!(goblin.hit_points, Some(7));

        let err = api.monster("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404, .. }));

        let err = api.monster("garbled").await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
