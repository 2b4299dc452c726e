//! Route table. `OPTIONS` is answered by the CORS layers with an empty 200,
//! other unsupported methods get 405 and unknown paths 404.

use crate::handlers::{
    auth, billing, feedback, info, messages, method_not_allowed, not_found, reddit,
    validate, waitlist,
};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use validationly_app::AppContext;

const PRODUCT_ORIGIN: &str = "https://validationly.com";

fn with_gate(route: MethodRouter<AppContext>) -> MethodRouter<AppContext> {
    route.fallback(method_not_allowed)
}

pub fn create_app(ctx: AppContext) -> Router {
    let public_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        .route("/validate", with_gate(post(validate::validate_idea)))
        .route(
            "/message-simulator",
            with_gate(post(messages::simulate_messages)),
        )
        .route("/auth/issue-token", with_gate(post(auth::issue_token)))
        .route("/auth/start-trial", with_gate(post(auth::start_trial)))
        .route(
            "/billing/create-checkout",
            with_gate(post(billing::create_checkout)),
        )
        .route("/billing/webhook", with_gate(post(billing::webhook)))
        .route(
            "/feedback",
            with_gate(get(feedback::list_feedback).post(feedback::submit_feedback)),
        )
        .route("/waitlist", with_gate(post(waitlist::join_waitlist)))
        .route("/reddit/ideas", with_gate(get(reddit::list_ideas)))
        .route("/reddit/pain", with_gate(post(reddit::analyze_pain)))
        .layer(public_cors);

    let info_routes = Router::new()
        .route("/info", with_gate(get(info::service_info)))
        .layer(
            CorsLayer::new()
                .allow_origin(HeaderValue::from_static(PRODUCT_ORIGIN))
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );

    Router::new()
        .nest("/api", api_routes.merge(info_routes))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(ctx)
}
