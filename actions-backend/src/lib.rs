pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use axum::{
    Router,
    routing::{get, put},
};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::AppState;
use crate::store::ItemStore;

pub fn app<S: ItemStore>(store: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/", get(|| async { "Action items API" }))
        .route(
            "/api/items",
            get(routes::list_items::<S>).post(routes::create_item::<S>),
        )
        .route(
            "/api/items/{id}",
            put(routes::update_item::<S>).delete(routes::delete_item::<S>),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(AppState::new(store))
}

pub async fn serve<S: ItemStore>(listener: TcpListener, store: S) -> std::io::Result<()> {
    axum::serve(listener, app(store)).await
}
