//! Guest API endpoints

use api_types::guest::{GuestDeleted, GuestNew, GuestUpdate, GuestView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, links, server::ServerState};

pub(crate) fn view_of(guest: &engine::Guest) -> GuestView {
    GuestView {
        id: Some(guest.id),
        name: guest.name.clone(),
        document: guest.document.clone(),
        phone: guest.phone.clone(),
        total_spent_minor: guest.total_spent_minor,
        links: Vec::new(),
    }
}

pub(crate) fn collection(guests: Vec<engine::Guest>) -> Vec<GuestView> {
    let mut views: Vec<GuestView> = guests.iter().map(view_of).collect();
    links::decorate_guest_collection(&mut views);
    views
}

fn single(guest: &engine::Guest) -> GuestView {
    let mut view = view_of(guest);
    view.links.push(links::link_to(links::GUESTS_PATH, guest.id));
    view
}

/// Handle requests for registering a new guest
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestNew>,
) -> Result<(StatusCode, Json<GuestView>), ServerError> {
    let id = state
        .engine
        .new_guest(&payload.name, &payload.document, &payload.phone)
        .await?;
    let guest = state.engine.guest(id).await?;

    Ok((StatusCode::CREATED, Json(single(&guest))))
}

/// Handle requests for listing every registered guest
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let guests = state.engine.guests().await?;

    Ok(Json(collection(guests)))
}

/// Handle requests for fetching one guest by id
pub async fn get(
    Path(id): Path<i64>,
    State(state): State<ServerState>,
) -> Result<Json<GuestView>, ServerError> {
    let guest = state.engine.guest(id).await?;

    Ok(Json(single(&guest)))
}

/// Handle requests for updating a guest's identity fields
pub async fn update(
    Path(id): Path<i64>,
    State(state): State<ServerState>,
    Json(payload): Json<GuestUpdate>,
) -> Result<Json<GuestView>, ServerError> {
    let guest = state
        .engine
        .update_guest(id, payload.id, &payload.name, &payload.document, &payload.phone)
        .await?;

    Ok(Json(single(&guest)))
}

/// Handle requests for removing a guest
pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<ServerState>,
) -> Result<Json<GuestDeleted>, ServerError> {
    state.engine.delete_guest(id).await?;

    Ok(Json(GuestDeleted {
        message: format!("Guest id: {id} successfully deleted"),
    }))
}

/// Handle requests for splitting guests by checkout status.
///
/// `out=false` lists guests with no recorded exit (currently in the
/// hotel), `out=true` the complement.
pub async fn by_exit(
    Path(out): Path<bool>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let guests = if out {
        state.engine.guests_checked_out().await?
    } else {
        state.engine.guests_checked_in().await?
    };

    Ok(Json(collection(guests)))
}
