use axum::{
    extract::{Query, State},
    Json,
};
use garde::Validate;

use kernel::model::period::Period;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::availability::AvailabilityQuery;
use crate::model::room::RoomsResponse;

pub async fn show_available_rooms(
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    query.validate(&())?;
    let period = Period::new(query.start, query.end)?;

    registry
        .availability_service()
        .list_available_rooms(&period)
        .await
        .map(RoomsResponse::from)
        .map(Json)
}
