//! Reference user endpoints
//!
//! A small in-memory registry whose handlers report failures through the
//! classified-error builder and let [`ApiError`] render them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Json, Router, routing};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use herald_core::{Kind, Message, MissingField, Parameter};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api_error::ApiError;

/// Registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Body of `POST /v1/users`
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Shared user registry
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: DashMap<String, User>,
    /// email -> user id
    emails: DashMap<String, String>,
    next_id: AtomicU64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.inner.users.get(id).map(|user| user.clone())
    }

    /// Register a user, rejecting blank fields and duplicate emails
    ///
    /// # Errors
    ///
    /// Returns a classified validation error for a blank field and a
    /// classified conflict for an email that is already registered
    pub fn create(&self, request: CreateUser) -> Result<User, ApiError> {
        let email = request.email.trim().to_lowercase();
        let name = request.name.trim().to_owned();

        for (field, value) in [("email", &email), ("name", &name)] {
            if value.is_empty() {
                return Err(herald_core::http_error!(
                    400,
                    Kind::Validation,
                    "missing_field",
                    Parameter::new(field),
                    MissingField::new(field)
                )
                .into());
            }
        }

        let id = format!("usr_{}", self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1);

        match self.inner.emails.entry(email.clone()) {
            Entry::Occupied(_) => {
                return Err(herald_core::http_error!(
                    409,
                    Kind::Exist,
                    "email_taken",
                    Parameter::new("email"),
                    Message::new("email address already registered")
                )
                .into());
            }
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        let user = User { id: id.clone(), email, name };
        self.inner.users.insert(id, user.clone());
        tracing::debug!(user_id = %user.id, "registered user");

        Ok(user)
    }
}

/// Routes for the reference user endpoints
pub fn user_router(store: UserStore) -> Router {
    Router::new()
        .route("/v1/users", routing::post(create_user))
        .route("/v1/users/{id}", routing::get(get_user))
        .route("/v1/failures/unclassified", routing::get(unclassified_failure))
        .with_state(store)
}

/// Handle `POST /v1/users`
async fn create_user(
    State(store): State<UserStore>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload.map_err(|rejection| body_rejected(&rejection))?;
    let user = store.create(request)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Classify a body the JSON extractor refused
///
/// The parser's own text stays in the log; clients get a fixed message.
fn body_rejected(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "request body rejected");

    let error = match rejection {
        JsonRejection::MissingJsonContentType(_) => herald_core::http_error!(
            415,
            Kind::UnsupportedMediaType,
            "unsupported_media_type",
            Message::new("request body must be sent as application/json")
        ),
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => herald_core::http_error!(
            400,
            Kind::InvalidRequest,
            "invalid_body",
            Message::new("request body is not a valid user object")
        ),
        other => herald_core::http_error!(
            other.status().as_u16(),
            Kind::InvalidRequest,
            "invalid_body",
            Message::new("request body could not be read")
        ),
    };
    ApiError::from(error)
}

/// Handle `GET /v1/users/{id}`
async fn get_user(State(store): State<UserStore>, Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    store.get(&id).map(Json).ok_or_else(|| {
        ApiError::from(herald_core::http_error!(
            404,
            Kind::NotFound,
            "user_missing",
            Parameter::new("id"),
            Message::new(format!("no user with id {id}"))
        ))
    })
}

/// Handle `GET /v1/failures/unclassified`
///
/// Fails with an error nobody classified; clients only see the generic 500.
async fn unclassified_failure() -> Result<(), ApiError> {
    let cause = std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection to primary database at 10.0.0.12:5432 refused",
    );
    Err(cause.into())
}
