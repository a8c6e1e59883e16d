//! Service Record Routes
//!
//! HTTP handlers that delegate to ServiceRecordService for business logic.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::{domain_error, json_body};
use crate::models::{
    to_responses, DateRangeQuery, PageQuery, ServiceRecordPage, ServiceRecordRequest,
    ServiceRecordResponse,
};
use crate::AppState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// List all service records
#[utoipa::path(
    get,
    path = "/api/services",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of service records", body = ServiceRecordPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ServiceRecordPage>> {
    let page = query.to_request(&state.config).map_err(domain_error)?;
    let records = state.records.find_all(page).await.map_err(domain_error)?;
    Ok(Json(
        ServiceRecordPage::try_from(records).map_err(domain_error)?,
    ))
}

/// Get service record by ID
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service record ID")),
    responses(
        (status = 200, description = "Service record found", body = ServiceRecordResponse),
        (status = 404, description = "Service record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ServiceRecordResponse>> {
    let record = state.records.find_by_id(id).await.map_err(domain_error)?;
    Ok(Json(
        ServiceRecordResponse::try_from(record).map_err(domain_error)?,
    ))
}

/// Service records paid within a date range
#[utoipa::path(
    get,
    path = "/api/services/paid-between",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Records whose payment date is in range", body = Vec<ServiceRecordResponse>),
        (status = 400, description = "Malformed or reversed dates"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn paid_between(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<ServiceRecordResponse>>> {
    let range = query.to_range().map_err(domain_error)?;
    let records = state
        .records
        .range_by_payment_date(range)
        .await
        .map_err(domain_error)?;
    Ok(Json(to_responses(records).map_err(domain_error)?))
}

/// Service records started within a date range
#[utoipa::path(
    get,
    path = "/api/services/started-between",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Records whose start date is in range", body = Vec<ServiceRecordResponse>),
        (status = 400, description = "Malformed or reversed dates"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn started_between(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<ServiceRecordResponse>>> {
    let range = query.to_range().map_err(domain_error)?;
    let records = state
        .records
        .range_by_start_date(range)
        .await
        .map_err(domain_error)?;
    Ok(Json(to_responses(records).map_err(domain_error)?))
}

/// Service records ended within a date range
#[utoipa::path(
    get,
    path = "/api/services/ended-between",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Records whose end date is in range", body = Vec<ServiceRecordResponse>),
        (status = 400, description = "Malformed or reversed dates"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn ended_between(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<ServiceRecordResponse>>> {
    let range = query.to_range().map_err(domain_error)?;
    let records = state
        .records
        .range_by_end_date(range)
        .await
        .map_err(domain_error)?;
    Ok(Json(to_responses(records).map_err(domain_error)?))
}

/// Service records awaiting payment
#[utoipa::path(
    get,
    path = "/api/services/pending",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of unpaid, non-cancelled records", body = ServiceRecordPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ServiceRecordPage>> {
    let page = query.to_request(&state.config).map_err(domain_error)?;
    let records = state.records.list_pending(page).await.map_err(domain_error)?;
    Ok(Json(
        ServiceRecordPage::try_from(records).map_err(domain_error)?,
    ))
}

/// Cancelled service records
#[utoipa::path(
    get,
    path = "/api/services/cancelled",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of cancelled records", body = ServiceRecordPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn list_cancelled(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ServiceRecordPage>> {
    let page = query.to_request(&state.config).map_err(domain_error)?;
    let records = state
        .records
        .list_cancelled(page)
        .await
        .map_err(domain_error)?;
    Ok(Json(
        ServiceRecordPage::try_from(records).map_err(domain_error)?,
    ))
}

/// Completed service records
#[utoipa::path(
    get,
    path = "/api/services/completed",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of completed records", body = ServiceRecordPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn list_completed(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ServiceRecordPage>> {
    let page = query.to_request(&state.config).map_err(domain_error)?;
    let records = state
        .records
        .list_completed(page)
        .await
        .map_err(domain_error)?;
    Ok(Json(
        ServiceRecordPage::try_from(records).map_err(domain_error)?,
    ))
}

/// Create a service record
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = ServiceRecordRequest,
    responses(
        (status = 201, description = "Service record created", body = ServiceRecordResponse),
        (status = 400, description = "Invalid record or malformed body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    payload: Result<Json<ServiceRecordRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let record = state
        .records
        .create(payload.into())
        .await
        .map_err(domain_error)?;

    let response = ServiceRecordResponse::try_from(record).map_err(domain_error)?;
    let location = format!("/api/services/{}", response.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// Update a service record
#[utoipa::path(
    put,
    path = "/api/services",
    request_body = ServiceRecordRequest,
    responses(
        (status = 200, description = "Service record updated", body = ServiceRecordResponse),
        (status = 400, description = "Invalid record, malformed body or missing id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    payload: Result<Json<ServiceRecordRequest>, JsonRejection>,
) -> ApiResult<Json<ServiceRecordResponse>> {
    let payload = json_body(payload)?;
    let record = state
        .records
        .update(payload.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(
        ServiceRecordResponse::try_from(record).map_err(domain_error)?,
    ))
}

/// Delete a service record
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service record ID")),
    responses(
        (status = 204, description = "Service record deleted"),
        (status = 404, description = "Service record not found"),
        (status = 409, description = "Service record is still referenced"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.records.delete(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cancel a service record
#[utoipa::path(
    post,
    path = "/api/services/{id}/cancel",
    params(("id" = i64, Path, description = "Service record ID")),
    responses(
        (status = 200, description = "Service record cancelled", body = ServiceRecordResponse),
        (status = 404, description = "Service record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn cancel_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ServiceRecordResponse>> {
    let record = state.records.cancel(id).await.map_err(domain_error)?;
    Ok(Json(
        ServiceRecordResponse::try_from(record).map_err(domain_error)?,
    ))
}

/// Reactivate a service record as pending
#[utoipa::path(
    post,
    path = "/api/services/{id}/reactivate",
    params(("id" = i64, Path, description = "Service record ID")),
    responses(
        (status = 200, description = "Service record reactivated", body = ServiceRecordResponse),
        (status = 404, description = "Service record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Services"
)]
pub async fn reactivate_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ServiceRecordResponse>> {
    let record = state.records.reactivate(id).await.map_err(domain_error)?;
    Ok(Json(
        ServiceRecordResponse::try_from(record).map_err(domain_error)?,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/services",
            get(list_services).post(create_service).put(update_service),
        )
        .route("/api/services/paid-between", get(paid_between))
        .route("/api/services/started-between", get(started_between))
        .route("/api/services/ended-between", get(ended_between))
        .route("/api/services/pending", get(list_pending))
        .route("/api/services/cancelled", get(list_cancelled))
        .route("/api/services/completed", get(list_completed))
        .route(
            "/api/services/:id",
            get(get_service).delete(delete_service),
        )
        .route("/api/services/:id/cancel", post(cancel_service))
        .route("/api/services/:id/reactivate", post(reactivate_service))
}
