//! Router-level tests against an in-memory store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use kernel::id::UserId;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;
use crate::presentation::middleware::{CurrentUser, require_auth};
use crate::presentation::router::auth_router_generic;

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Credential>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

impl UserRepository for MemoryStore {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        tables.users.insert(user.user_id, user.clone());
        tables.credentials.insert(credential.user_id, credential.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().any(|u| &u.email == email))
    }

    async fn update_profile(
        &self,
        user: &User,
        credential: Option<&Credential>,
    ) -> AuthResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.users.insert(user.user_id, user.clone());
        if let Some(credential) = credential {
            tables.credentials.insert(credential.user_id, credential.clone());
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        tables.credentials.remove(user_id);
        Ok(tables.users.remove(user_id).is_some())
    }
}

impl CredentialRepository for MemoryStore {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.tables.lock().unwrap().credentials.get(user_id).cloned())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> AuthConfig {
    AuthConfig::new(b"test-secret-test-secret-test-secret!".to_vec())
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn alice() -> Value {
    json!({ "username": "alice", "email": "alice@example.com", "password": "GoodPass1" })
}

async fn whoami(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(json!({ "id": user.user_id }))
}

fn protected_app(store: MemoryStore, config: AuthConfig) -> Router {
    let state = AuthAppState::new(Arc::new(store), Arc::new(config));
    Router::new()
        .route("/me", get(whoami))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            require_auth::<MemoryStore>,
        ))
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn register_returns_created_user_and_token() {
    let store = MemoryStore::default();
    let app = auth_router_generic(store.clone(), config());

    let (status, body) = send(app, json_request("/register", alice())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    let payload = &body["payload"];
    assert_eq!(payload["username"], "alice");
    assert_eq!(payload["email"], "alice@example.com");
    assert!(payload["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(payload.get("password").is_none());
    assert_eq!(payload["followers"], json!([]));
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn register_duplicate_email_is_rejected() {
    let store = MemoryStore::default();
    let app = auth_router_generic(store.clone(), config());

    let (first, _) = send(app.clone(), json_request("/register", alice())).await;
    assert_eq!(first, StatusCode::CREATED);

    let mut again = alice();
    again["email"] = json!("ALICE@example.com");
    again["username"] = json!("alice2");
    let (status, body) = send(app, json_request("/register", again)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists!");
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn register_empty_body_asks_for_all_fields() {
    let app = auth_router_generic(MemoryStore::default(), config());

    let (status, body) = send(app, json_request("/register", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Please fill all the fields."]));
}

#[tokio::test]
async fn register_reports_every_failing_rule() {
    let store = MemoryStore::default();
    let app = auth_router_generic(store.clone(), config());

    let (status, body) = send(
        app,
        json_request(
            "/register",
            json!({ "username": "al", "email": "nope", "password": "weak" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn register_malformed_json_is_bad_request() {
    let app = auth_router_generic(MemoryStore::default(), config());
    let req = Request::post("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_with_correct_password() {
    let app = auth_router_generic(MemoryStore::default(), config());
    send(app.clone(), json_request("/register", alice())).await;

    let (status, body) = send(
        app,
        json_request(
            "/login",
            json!({ "email": "alice@example.com", "password": "GoodPass1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["username"], "alice");
    assert!(body["payload"]["token"].is_string());
}

#[tokio::test]
async fn login_wrong_password_and_unknown_email_look_the_same() {
    let app = auth_router_generic(MemoryStore::default(), config());
    send(app.clone(), json_request("/register", alice())).await;

    let (wrong_status, wrong_body) = send(
        app.clone(),
        json_request(
            "/login",
            json!({ "email": "alice@example.com", "password": "OtherPass1" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        app,
        json_request(
            "/login",
            json!({ "email": "nobody@example.com", "password": "GoodPass1" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_body["message"], "Invalid credentials");
    assert_eq!(wrong_body, unknown_body);
}

// ============================================================================
// Identity guard
// ============================================================================

#[tokio::test]
async fn guard_without_header_is_unauthorized() {
    let app = protected_app(MemoryStore::default(), config());

    let (status, body) = send(app, Request::get("/me").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token");
}

#[tokio::test]
async fn guard_rejects_garbage_and_foreign_tokens() {
    let store = MemoryStore::default();
    let app = protected_app(store, config());

    let garbage = Request::get("/me")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), garbage).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid Token");

    // Signed with another secret
    let other = AuthConfig::new(b"another-secret-another-secret-xx".to_vec());
    let token = issue_token(&other, &UserId::new()).unwrap();
    let foreign = Request::get("/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, foreign).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guard_resolves_registered_user() {
    let store = MemoryStore::default();
    let auth = auth_router_generic(store.clone(), config());
    let (_, body) = send(auth, json_request("/register", alice())).await;
    let token = body["payload"]["token"].as_str().unwrap().to_string();
    let id = body["payload"]["id"].clone();

    let app = protected_app(store.clone(), config());
    let req = Request::get("/me")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, me) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id);

    // Token for a deleted user no longer authenticates
    let user_id: UserId = serde_json::from_value(id).unwrap();
    store.delete(&user_id).await.unwrap();
    let req = Request::get("/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
