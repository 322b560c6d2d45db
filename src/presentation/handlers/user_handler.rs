use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError, repositories::user_repository::UserRepository,
        services::password_service::PasswordHasher,
    },
    presentation::{response::ApiResponse, validation::validate_register_request},
    usecase::register_user_usecase::RegisterUserUsecase,
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Deserializer, Serialize};

pub const REGISTERED: &str = "User registered successfully";
pub const VALIDATION_FAILED: &str = "Validation failed";
pub const MALFORMED_BODY: &str = "Malformed request body";
pub const REGISTRATION_ERROR: &str = "An error occurred during registration";

// Request

/// json for register request
///
/// Missing or `null` fields deserialize as empty strings and are reported by validation.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested under `/user` by the main router
pub fn create_user_router<
    U: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<U, P>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/register", post(register::<U, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<U: UserRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterUserUsecase<U, P>>,
}

// handler function

/// handler function for register
async fn register<
    U: UserRepository + Send + Sync,
    P: PasswordHasher + Send + Sync,
>(
    State(state): State<AppState<U, P>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable registration body");
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(MALFORMED_BODY)))
                .into_response();
        }
    };

    if let Err(errors) = validate_register_request(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure_with(VALIDATION_FAILED, errors)),
        )
            .into_response();
    }

    match state
        .register_service
        .register_user(payload.email, payload.password)
        .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(REGISTERED, user.email().to_string())),
        )
            .into_response(),
        Err(err @ DomainError::DuplicateEmail(_)) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(err.to_string()))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(REGISTRATION_ERROR)),
            )
                .into_response()
        }
    }
}
