use crate::errors::AppError;
use crate::models::{
    DrinkRecord, HistoryResponse, NewDrink, StatsQuery, StatsResponse, Suggestions, YearsResponse,
};
use crate::state::AppState;
use crate::stats::{build_history, build_stats, build_suggestions, build_years, parse_year};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::Local;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let drinks = state.store.load().await;
    Html(render_index(drinks.len()))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let drinks = state.store.load().await;
    Json(build_history(&drinks, &Local))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let year = parse_year(query.year.as_deref()).map_err(AppError::bad_request)?;
    let drinks = state.store.load().await;
    Ok(Json(build_stats(&drinks, year, &Local)))
}

pub async fn get_years(State(state): State<AppState>) -> Json<YearsResponse> {
    let drinks = state.store.load().await;
    Json(build_years(&drinks))
}

pub async fn get_suggestions(State(state): State<AppState>) -> Json<Suggestions> {
    let drinks = state.store.load().await;
    Json(build_suggestions(&drinks))
}

pub async fn log_drink(
    State(state): State<AppState>,
    Json(payload): Json<NewDrink>,
) -> Result<(StatusCode, Json<DrinkRecord>), AppError> {
    let record = state.store.append(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn log_drink_form(
    State(state): State<AppState>,
    Form(payload): Form<NewDrink>,
) -> Result<Redirect, AppError> {
    state.store.append(payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_drink(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.remove_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_drink_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.store.remove_by_id(id).await?;
    Ok(Redirect::to("/"))
}
