//! Shared fixtures for API tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cs_core::auth::TokenSigner;
use cs_core::catalog::{Product, Review, Role, User};
use cs_core::comment::Comment;
use cs_core::config::Config;
use cs_core::store::{Collection, DocumentStore, Record};
use cs_core::types::DocumentId;
use cs_server::{router, AppState};
use cs_storage::MemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const SECRET: &str = "test_secret_for_api";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.token_secret = Some(SECRET.to_string());
    config
}

pub fn john_doe() -> User {
    User {
        id: DocumentId::generate(),
        username: "JohnDoe1".to_string(),
        firstname: Some("John1".to_string()),
        lastname: Some("Doe1".to_string()),
        email: Some("john1@gmail.com".to_string()),
        password: Some("$2b$10$hash".to_string()),
        role: Role::Admin,
    }
}

pub fn drone() -> Product {
    Product {
        id: DocumentId::generate(),
        name: "Drone1".to_string(),
        detail: Some("Drone with camera".to_string()),
        stock: 30,
        price: 200.0,
        product_img: None,
    }
}

pub fn review_of(product: &Product, user: &User) -> Review {
    Review {
        id: DocumentId::generate(),
        content: "Which drone with camera is right for you?".to_string(),
        product: product.id.clone(),
        review_img: None,
        user: user.id.clone(),
    }
}

/// A router over a seeded store
pub struct TestApp {
    pub store: Arc<dyn DocumentStore>,
    pub router: Router,
    pub user: User,
    pub product: Product,
    pub review: Review,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let user = john_doe();
        let product = drone();
        let review = review_of(&product, &user);

        Collection::<User>::new(store.as_ref()).insert_one(&user).unwrap();
        Collection::<Product>::new(store.as_ref())
            .insert_one(&product)
            .unwrap();
        Collection::<Review>::new(store.as_ref())
            .insert_one(&review)
            .unwrap();

        let token = TokenSigner::from_config(&config.auth)
            .unwrap()
            .sign(&user.id)
            .unwrap();
        let state = AppState::new(&config, store.clone()).unwrap();
        let router = router(state, config.server.max_body_bytes);

        Self {
            store,
            router,
            user,
            product,
            review,
            token,
        }
    }

    pub fn comment_body(&self, text: &str) -> String {
        serde_json::json!({
            "comment": text,
            "product": self.product.id,
            "review": self.review.id,
        })
        .to_string()
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn stored_comments(&self) -> usize {
        self.store.count(Comment::COLLECTION).unwrap()
    }

    pub async fn create(&self, auth: Option<&str>, body: impl Into<Body>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/comments/create")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        self.send(builder.body(body.into()).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
