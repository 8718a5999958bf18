//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::http::gate::require_session;
use crate::http::{apps, datasets, handlers};
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// Open
///   GET    /health                          - Health check
///   POST   /login                           - Establish the session
///   POST   /chat                            - Chat with an app key
///
/// Session required (401 before login)
///   GET    /apps                            - List apps
///   POST   /apps                            - Create app
///   GET    /apps/{app_id}                   - App detail
///   PUT    /apps/{app_id}                   - Rename app
///   DELETE /apps/{app_id}                   - Delete app
///   PUT    /apps/{app_id}/prompt            - Replace prompt
///   PUT    /apps/{app_id}/model             - Replace model settings
///   GET    /apps/{app_id}/model-config      - Model configuration
///   GET    /apps/{app_id}/parameters        - App parameters
///   POST   /apps/{app_id}/variables         - Add input variable
///   PUT    /apps/{app_id}/opening           - Opening statement
///   POST   /apps/{app_id}/knowledge         - Link dataset
///   POST   /apps/{app_id}/tools             - Add agent tool
///   GET    /apps/{app_id}/workflow          - Draft workflow
///   PUT    /apps/{app_id}/workflow          - Replace draft workflow
///   POST   /apps/{app_id}/workflow/publish  - Publish workflow
///   GET    /datasets                        - List datasets
///   POST   /datasets                        - Create dataset
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let open_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route("/chat", post(handlers::chat));

    let console_routes = Router::new()
        .route("/apps", get(apps::list_apps).post(apps::create_app))
        .route(
            "/apps/{app_id}",
            get(apps::get_app)
                .put(apps::rename_app)
                .delete(apps::delete_app),
        )
        .route("/apps/{app_id}/prompt", put(apps::update_prompt))
        .route("/apps/{app_id}/model", put(apps::update_model))
        .route("/apps/{app_id}/model-config", get(apps::get_model_config))
        .route("/apps/{app_id}/parameters", get(apps::get_parameters))
        .route("/apps/{app_id}/variables", post(apps::add_variable))
        .route("/apps/{app_id}/opening", put(apps::update_opening))
        .route("/apps/{app_id}/knowledge", post(apps::link_knowledge))
        .route("/apps/{app_id}/tools", post(apps::add_tool))
        .route(
            "/apps/{app_id}/workflow",
            get(apps::get_workflow).put(apps::update_workflow),
        )
        .route(
            "/apps/{app_id}/workflow/publish",
            post(apps::publish_workflow),
        )
        .route(
            "/datasets",
            get(datasets::list_datasets).post(datasets::create_dataset),
        )
        // Gate runs only on matched routes so unknown paths still 404
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(open_routes)
        .merge(console_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
