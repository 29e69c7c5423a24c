use axum::{extract::{Query, State}, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

use recall_core::{
    due_cards, find_card, insert_card, new_card, review_card, summarize, Card,
    CollectionStore, CoreError, IntervalUnit, Rating,
};

use crate::api::dto::{NewCardIn, ReviewIn, StatsOut};

pub struct AppState {
    pub store: Arc<dyn CollectionStore>,
    pub unit: IntervalUnit,
    // load-modify-save sequences from concurrent requests run one at a time
    pub writes: Mutex<()>,
}

#[derive(Deserialize)]
pub struct DueQuery {
    max: Option<usize>,
}

type ApiResult<T> = Result<T, StatusCode>;

fn status_of(e: impl Into<CoreError>) -> StatusCode {
    match e.into() {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        CoreError::Storage(e) => {
            error!("storage: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn list_cards(State(st): State<Arc<AppState>>) -> ApiResult<Json<Vec<Card>>> {
    let cards = st.store.load().await.map_err(status_of)?;
    Ok(Json(cards))
}

pub async fn add_card(State(st): State<Arc<AppState>>, Json(body): Json<NewCardIn>)
    -> ApiResult<(StatusCode, Json<Card>)>
{
    let card = new_card(&body.question, &body.answer, Utc::now()).map_err(status_of)?;
    let _guard = st.writes.lock().await;
    let mut cards = st.store.load().await.map_err(status_of)?;
    insert_card(&mut cards, card.clone());
    st.store.save(&cards).await.map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn reset_cards(State(st): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    let _guard = st.writes.lock().await;
    st.store.save(&[]).await.map_err(status_of)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn due(State(st): State<Arc<AppState>>, Query(q): Query<DueQuery>) -> ApiResult<Json<Vec<Card>>> {
    let cards = st.store.load().await.map_err(status_of)?;
    let mut pool = due_cards(&cards, Utc::now());
    if let Some(m) = q.max { pool.truncate(m); }
    Ok(Json(pool))
}

pub async fn post_review(State(st): State<Arc<AppState>>, Json(body): Json<ReviewIn>) -> ApiResult<Json<Card>> {
    let rating: Rating = body.rating.parse().map_err(status_of)?;
    let _guard = st.writes.lock().await;
    let mut cards = st.store.load().await.map_err(status_of)?;
    let id = find_card(&cards, &body.card_id).map_err(status_of)?.id.clone();
    let updated = review_card(&mut cards, &id, rating, Utc::now(), st.unit).map_err(status_of)?;
    st.store.save(&cards).await.map_err(status_of)?;
    Ok(Json(updated))
}

pub async fn stats(State(st): State<Arc<AppState>>) -> ApiResult<Json<StatsOut>> {
    let cards = st.store.load().await.map_err(status_of)?;
    Ok(Json(StatsOut::new(summarize(&cards, Utc::now()), st.unit)))
}
