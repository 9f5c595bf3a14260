//! Self-link decoration for response payloads.

use api_types::{Link, guest::GuestView};

pub const GUESTS_PATH: &str = "/hotel/guests";
pub const CHECKINS_PATH: &str = "/hotel/checkins";

/// Self link for a resource whose id is known.
pub fn link_to(base: &str, id: i64) -> Link {
    Link::self_to(format!("{base}/{id}"))
}

/// Self link for a wire view, which may carry no id.
pub fn self_link(base: &str, id: Option<i64>) -> Result<Link, MissingId> {
    let id = id.ok_or(MissingId)?;
    Ok(link_to(base, id))
}

/// Attaches a self link to each guest in a list result.
///
/// A per-item failure is logged and that item is left undecorated while
/// the rest of the list still succeeds. This tolerance is for link
/// decoration only.
pub fn decorate_guest_collection(views: &mut [GuestView]) {
    for view in views.iter_mut() {
        match self_link(GUESTS_PATH, view.id) {
            Ok(link) => view.links.push(link),
            Err(err) => tracing::error!("failed to build guest self link: {err}"),
        }
    }
}

#[derive(Debug)]
pub struct MissingId;

impl std::fmt::Display for MissingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource has no id to link to")
    }
}

impl std::error::Error for MissingId {}
