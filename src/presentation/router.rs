use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    domain::{repositories::user_repository::UserRepository, services::password_service::PasswordHasher},
    presentation::handlers::{health::health, user_handler::create_user_router},
    usecase::register_user_usecase::RegisterUserUsecase,
};

/// Build the full application router.
///
/// Cross-origin calls are accepted from `allowed_origin` only; any other
/// `Origin` gets no `Access-Control-Allow-Origin` header back.
pub fn build_app<
    U: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<U, P>,
    allowed_origin: HeaderValue,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .nest("/user", create_user_router(register_service))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
