use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health, protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/register", post(auth::register_post))
        .route("/api/login", post(auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(session_routes())
        .merge(plan_routes())
        .merge(plan_detail_routes())
        // route_layer so unknown paths still 404 instead of 401
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn session_routes() -> Router<AppState> {
    use protected::auth;

    Router::new()
        .route("/api/auth/whoami", get(auth::session_whoami))
        .route("/api/logout", post(auth::session_logout))
}

fn plan_routes() -> Router<AppState> {
    use protected::plans;

    Router::new()
        .route("/api/plans", post(plans::create))
        .route("/api/plans/list", get(plans::list))
        .route("/api/plans/get", get(plans::get))
        .route("/api/plans/delete", delete(plans::delete))
}

fn plan_detail_routes() -> Router<AppState> {
    use protected::plan_details;

    Router::new()
        .route("/api/plan-details/add", post(plan_details::add))
        .route("/api/plan-details/get", get(plan_details::get))
        .route("/api/plan-details/update", put(plan_details::update))
        .route("/api/plan-details/delete", delete(plan_details::delete))
}
