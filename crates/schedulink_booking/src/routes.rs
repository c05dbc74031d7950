// --- File: crates/schedulink_booking/src/routes.rs ---

use crate::handlers::{
    book_slot_handler, cancel_slot_handler, create_slot_handler, create_user_handler,
    delete_slot_handler, get_slot_handler, get_user_bookings_handler, get_user_handler,
    get_user_slots_handler, list_slots_handler, list_users_handler, update_slot_handler,
};
use crate::logic::SchedulingState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use schedulink_db::EntityStore;
use std::sync::Arc;

/// Creates the full API router over `store`: liveness, users and slots.
pub fn routes<S: EntityStore>(store: Arc<S>) -> Router {
    let state = Arc::new(SchedulingState::new(store));

    let api = Router::new()
        .route(
            "/users",
            post(create_user_handler::<S>).get(list_users_handler::<S>),
        )
        .route("/users/{user_id}", get(get_user_handler::<S>))
        .route("/users/{user_id}/slots", get(get_user_slots_handler::<S>))
        .route(
            "/users/{user_id}/bookings",
            get(get_user_bookings_handler::<S>),
        )
        .route(
            "/slots",
            post(create_slot_handler::<S>).get(list_slots_handler::<S>),
        )
        .route(
            "/slots/{slot_id}",
            get(get_slot_handler::<S>)
                .put(update_slot_handler::<S>)
                .delete(delete_slot_handler::<S>),
        )
        .route("/slots/{slot_id}/book", patch(book_slot_handler::<S>))
        .route("/slots/{slot_id}/cancel", patch(cancel_slot_handler::<S>))
        .with_state(state);

    schedulink_common::routes().merge(api)
}
