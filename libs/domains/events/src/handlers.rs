use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use axum_helpers::errors::responses::{BadRequestQueryResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{Event, FetchParams};
use crate::repository::EventRepository;
use crate::service::EventService;

pub const TAG: &str = "events";

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(fetch_events),
    components(
        schemas(Event, FetchParams),
        responses(BadRequestQueryResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Read access to recorded host events")
    )
)]
pub struct ApiDoc;

/// Create the events router
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/fetch", get(fetch_events))
        .with_state(shared_service)
}

/// Fetch events in an inclusive time range, optionally for one host
#[utoipa::path(
    get,
    path = "/fetch",
    tag = TAG,
    params(FetchParams),
    responses(
        (status = 200, description = "Matching events in storage order", body = Vec<Event>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, description = "Database connection failed", body = String, content_type = "text/plain")
    )
)]
async fn fetch_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    params: Result<Query<FetchParams>, QueryRejection>,
) -> EventResult<Json<Vec<Event>>> {
    let Query(params) = params?;
    let events = service.fetch(params).await?;
    Ok(Json(events))
}
