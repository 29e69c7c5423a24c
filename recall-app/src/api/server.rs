use axum::{routing::{get, post}, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use recall_core::{CollectionStore, IntervalUnit};
use crate::api::routes::{add_card, due, list_cards, post_review, reset_cards, stats, AppState};

pub fn router(store: Arc<dyn CollectionStore>, unit: IntervalUnit) -> Router {
    let state = Arc::new(AppState { store, unit, writes: Mutex::new(()) });

    Router::new()
        .route("/cards", get(list_cards).post(add_card).delete(reset_cards))
        .route("/due", get(due))
        .route("/review", post(post_review))
        .route("/stats", get(stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(store: Arc<dyn CollectionStore>, unit: IntervalUnit, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(store, unit);
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {addr} (intervals in {unit})");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
