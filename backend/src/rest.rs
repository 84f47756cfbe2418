use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CreateCleaningRecordRequest, RenameTapRequest, UpdateCleaningRecordRequest};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::{ScheduleService, TapService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbConnection,
    pub schedule_service: ScheduleService,
    pub tap_service: TapService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let schedule_service = ScheduleService::new(db.clone());
        let tap_service = TapService::new(db.clone());
        Self {
            db,
            schedule_service,
            tap_service,
        }
    }
}

/// Query parameters for the cleaning record list endpoint
#[derive(Deserialize, Debug)]
pub struct RecordListQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query parameters for the week schedule endpoint
#[derive(Deserialize, Debug)]
pub struct WeekScheduleQuery {
    /// Reference date; any day of the wanted week. Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Axum handler for GET /api/taps
pub async fn list_taps(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/taps");

    match state.db.list_taps().await {
        Ok(taps) => (StatusCode::OK, Json(taps)).into_response(),
        Err(e) => {
            tracing::error!("Error listing taps: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing taps").into_response()
        }
    }
}

/// Axum handler for POST /api/taps; the server assigns id and default name
pub async fn create_tap(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/taps");

    match state.tap_service.create_tap().await {
        Ok(tap) => (StatusCode::CREATED, Json(tap)).into_response(),
        Err(e) => {
            tracing::error!("Error creating tap: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating tap").into_response()
        }
    }
}

/// Axum handler for PUT /api/taps/:id
pub async fn rename_tap(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RenameTapRequest>,
) -> impl IntoResponse {
    info!("PUT /api/taps/{} - name: {}", id, request.name);

    match state.tap_service.rename_tap(id, &request.name).await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Tap not found").into_response(),
        Err(e) => {
            tracing::error!("Error renaming tap {}: {:?}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error renaming tap").into_response()
        }
    }
}

/// Axum handler for GET /api/cleaning-records
pub async fn list_cleaning_records(
    State(state): State<AppState>,
    Query(query): Query<RecordListQuery>,
) -> impl IntoResponse {
    info!("GET /api/cleaning-records - query: {:?}", query);

    match state
        .db
        .list_cleaning_records(query.start_date, query.end_date)
        .await
    {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!("Error listing cleaning records: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing cleaning records").into_response()
        }
    }
}

/// Axum handler for POST /api/cleaning-records
pub async fn create_cleaning_record(
    State(state): State<AppState>,
    Json(request): Json<CreateCleaningRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/cleaning-records - request: {:?}", request);

    match state.db.insert_cleaning_record(&request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => {
            tracing::error!("Error creating cleaning record: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating cleaning record").into_response()
        }
    }
}

/// Axum handler for GET /api/cleaning-records/:id
pub async fn get_cleaning_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/cleaning-records/{}", id);

    match state.db.get_cleaning_record(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Cleaning record not found").into_response(),
        Err(e) => {
            tracing::error!("Error reading cleaning record {}: {:?}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading cleaning record").into_response()
        }
    }
}

/// Axum handler for PUT /api/cleaning-records/:id
pub async fn update_cleaning_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCleaningRecordRequest>,
) -> impl IntoResponse {
    info!("PUT /api/cleaning-records/{} - request: {:?}", id, request);

    match state.db.update_cleaning_record(id, &request).await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Cleaning record not found").into_response(),
        Err(e) => {
            tracing::error!("Error updating cleaning record {}: {:?}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating cleaning record").into_response()
        }
    }
}

/// Axum handler for GET /api/schedule/week
pub async fn get_week_schedule(
    State(state): State<AppState>,
    Query(query): Query<WeekScheduleQuery>,
) -> impl IntoResponse {
    info!("GET /api/schedule/week - query: {:?}", query);

    let reference = query
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match state.schedule_service.week_schedule(reference).await {
        Ok(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => {
            tracing::error!("Error composing week schedule: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error composing week schedule").into_response()
        }
    }
}
