//! Seat assignment API ("groups" in the admin UI)
//!
//! | Method | Path | Body / Query |
//! |--------|------|--------------|
//! | GET | /api/admin/groups | `?eventId=` |
//! | POST | /api/admin/groups | `{event_id, user_id, table_number?}` |
//! | PUT | /api/admin/groups | `{assignment_id, table_number}` |
//! | DELETE | /api/admin/groups | `?id=` |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/groups",
        get(handler::list)
            .post(handler::create)
            .put(handler::update)
            .delete(handler::delete),
    )
}
