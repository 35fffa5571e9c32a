use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::Json,
};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, instrument};

use crate::handlers::households::require_household;
use crate::schemas::{AppState, ErrorResponse};

/// Subscribe to change events of a household
///
/// Server-sent event stream; one event per transaction or budget write
/// in the household. The subscription starts at connect time and a
/// slow consumer silently loses the oldest buffered events.
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/events",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    responses(
        (status = 200, description = "SSE stream of change events", content_type = "text/event-stream"),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn household_events(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<ErrorResponse>)>
{
    require_household(&state, household_id).await?;

    debug!("Opening event stream for household {}", household_id);

    let stream = BroadcastStream::new(state.changes.subscribe()).filter_map(move |result| {
        match result {
            Ok(event) if event.household_id == household_id => {
                Event::default().json_data(&event).ok().map(Ok)
            }
            // Other households' events and lag drops are skipped
            _ => None,
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
