//! Check-in API endpoints
//!
//! The guest filter lookups live under this prefix too: serving them from
//! the check-in surface is what triggers the expense recompute pass after
//! the read, matching the stay-read semantics.

use api_types::{
    checkin::{CheckinNew, CheckinView},
    guest::GuestView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, guests, links, server::ServerState};

fn view_of(checkin: &engine::Checkin, guest: &engine::Guest) -> CheckinView {
    CheckinView {
        id: Some(checkin.id),
        guest: guests::view_of(guest),
        entry_time: checkin.entry_time,
        exit_time: checkin.exit_time,
        vehicle_surcharge: checkin.vehicle_surcharge,
        links: Vec::new(),
    }
}

fn single(checkin: &engine::Checkin, guest: &engine::Guest) -> CheckinView {
    let mut view = view_of(checkin, guest);
    view.links
        .push(links::link_to(links::CHECKINS_PATH, checkin.id));
    view
}

/// Handle requests for recording a stay
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CheckinNew>,
) -> Result<(StatusCode, Json<CheckinView>), ServerError> {
    let (checkin, guest) = state
        .engine
        .new_checkin(
            payload.guest_id,
            payload.entry_time,
            payload.exit_time,
            payload.vehicle_surcharge,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(single(&checkin, &guest))))
}

/// Handle requests for fetching one check-in by id
pub async fn get(
    Path(id): Path<i64>,
    State(state): State<ServerState>,
) -> Result<Json<CheckinView>, ServerError> {
    let (checkin, guest) = state.engine.checkin(id).await?;

    Ok(Json(single(&checkin, &guest)))
}

/// Handle requests for listing guests by exact name
pub async fn by_name(
    Path(name): Path<String>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let found = state.engine.guests_by_name(&name).await?;
    state.engine.recompute_expenses().await?;

    Ok(Json(guests::collection(found)))
}

/// Handle requests for listing guests by exact document
pub async fn by_document(
    Path(document): Path<String>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let found = state.engine.guests_by_document(&document).await?;
    state.engine.recompute_expenses().await?;

    Ok(Json(guests::collection(found)))
}

/// Handle requests for listing guests by exact phone
pub async fn by_phone(
    Path(phone): Path<String>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let found = state.engine.guests_by_phone(&phone).await?;
    state.engine.recompute_expenses().await?;

    Ok(Json(guests::collection(found)))
}
