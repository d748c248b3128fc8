//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceExt;

use crudkit_api::{AppState, build_app, build_router, crud_routes};
use crudkit_core::config::{AppConfig, RepositoryConfig};
use crudkit_core::types::MatchPolicy;
use crudkit_database::{GenericRepository, InMemoryContext};
use crudkit_entity::{Entity, SimpleBaseEntity, SimpleUuidGenerator, reflect};
use crudkit_service::{BaseService, BaseServiceImpl};

/// Three-level entity: `Product` -> `SimpleBaseEntity` -> `DefaultBaseEntity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(flatten)]
    pub base: SimpleBaseEntity<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub stock: i64,
}

reflect! {
    impl for Product {
        parent: base;
        fields: [sku, category, stock];
    }
}

impl Entity for Product {
    type Id = String;
    const TABLE: &'static str = "products";

    fn id(&self) -> Option<&String> {
        self.base.id()
    }

    fn set_id(&mut self, id: String) {
        self.base.set_id(id);
    }
}

pub type ProductRepository = GenericRepository<Product, InMemoryContext<Product>>;

pub fn product(sku: &str, category: &str, stock: i64) -> Product {
    Product {
        sku: Some(sku.to_string()),
        category: Some(category.to_string()),
        stock,
        ..Product::default()
    }
}

/// Repository over a fresh in-memory context, seeded in this order:
/// `A-1` tools 5, `A-2` tools 0, `B-1` paint 12, `B-2` paint 3.
pub fn seeded_repository(policy: MatchPolicy) -> ProductRepository {
    seed(GenericRepository::new(InMemoryContext::new(SimpleUuidGenerator)).with_match_policy(policy))
}

/// Seeded repository built from configuration, the way the server does.
pub fn configured_repository(config: &RepositoryConfig) -> ProductRepository {
    let context =
        InMemoryContext::new(SimpleUuidGenerator).with_strategy(config.identity_strategy);
    seed(
        GenericRepository::new(context)
            .with_match_policy(config.match_policy)
            .with_max_page_size(config.max_page_size),
    )
}

fn seed(repository: ProductRepository) -> ProductRepository {
    repository
        .save_all(vec![
            product("A-1", "tools", 5),
            product("A-2", "tools", 0),
            product("B-1", "paint", 12),
            product("B-2", "paint", 3),
        ])
        .expect("Failed to seed products");
    repository
}

pub fn all_ids(repository: &ProductRepository) -> Vec<String> {
    repository
        .list_all()
        .expect("Failed to list products")
        .iter()
        .filter_map(|p| p.id().cloned())
        .collect()
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The service behind `/api/products`
    pub service: Arc<dyn BaseService<Product>>,
}

impl TestApp {
    /// Create a new test application with seeded products, matching
    /// examples on their non-default fields.
    pub fn new() -> Self {
        Self::with_config(Self::default_config())
    }

    /// Config used by [`TestApp::new`].
    pub fn default_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.repository.match_policy = MatchPolicy::MatchNonDefaultFields;
        config
    }

    pub fn with_config(config: AppConfig) -> Self {
        let repository = configured_repository(&config.repository);
        let service: Arc<dyn BaseService<Product>> =
            Arc::new(BaseServiceImpl::new(Arc::new(repository)));

        let routes = build_router(AppState::new(config.clone()))
            .nest("/api/products", crud_routes(Arc::clone(&service)));
        let router = build_app(routes, &config);

        Self { router, service }
    }

    /// Send a request and parse the JSON response body.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
