// File: crates/schedulink_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{BookRequest, MessageResponse, SlotQuery};
use schedulink_common::handlers::HealthResponse;
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, User};

#[utoipa::path(
    post,
    path = "/users",
    request_body(content = NewUser, example = json!({
        "email": "ana@example.com",
        "name": "Ana Silva",
        "phone": "+41 79 000 00 00"
    })),
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Missing field or email already registered",
         example = json!({
             "detail": "Email already registered",
             "error": { "message": "Email already registered", "code": 400 }
         })
        )
    ),
    tag = "Users"
)]
fn doc_create_user_handler() {}

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = [User])),
    tag = "Users"
)]
fn doc_list_users_handler() {}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
fn doc_get_user_handler() {}

#[utoipa::path(
    get,
    path = "/users/{user_id}/slots",
    params(("user_id" = i64, Path, description = "Creator id")),
    responses(
        (status = 200, description = "Slots created by the user", body = [Slot]),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
fn doc_get_user_slots_handler() {}

#[utoipa::path(
    get,
    path = "/users/{user_id}/bookings",
    params(("user_id" = i64, Path, description = "Booker id")),
    responses(
        (status = 200, description = "Slots booked by the user", body = [Slot]),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
fn doc_get_user_bookings_handler() {}

#[utoipa::path(
    post,
    path = "/slots",
    request_body(content = NewSlot, example = json!({
        "title": "Consultation",
        "description": "Initial call",
        "date": "2025-09-01",
        "start_time": "09:00",
        "end_time": "09:30",
        "user_id": 1
    })),
    responses(
        (status = 200, description = "Slot created", body = Slot),
        (status = 400, description = "Missing title"),
        (status = 404, description = "Creator not found")
    ),
    tag = "Slots"
)]
fn doc_create_slot_handler() {}

#[utoipa::path(
    get,
    path = "/slots",
    params(SlotQuery),
    responses((status = 200, description = "Matching slots ordered by id", body = [Slot])),
    tag = "Slots"
)]
fn doc_list_slots_handler() {}

#[utoipa::path(
    get,
    path = "/slots/{slot_id}",
    params(("slot_id" = i64, Path, description = "Slot id")),
    responses(
        (status = 200, description = "The slot", body = Slot),
        (status = 404, description = "Slot not found")
    ),
    tag = "Slots"
)]
fn doc_get_slot_handler() {}

#[utoipa::path(
    put,
    path = "/slots/{slot_id}",
    params(("slot_id" = i64, Path, description = "Slot id")),
    request_body(content = SlotChanges, example = json!({ "title": "Follow-up" })),
    responses(
        (status = 200, description = "Updated slot", body = Slot),
        (status = 404, description = "Slot not found")
    ),
    tag = "Slots"
)]
fn doc_update_slot_handler() {}

#[utoipa::path(
    delete,
    path = "/slots/{slot_id}",
    params(("slot_id" = i64, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Slot deleted", body = MessageResponse,
         example = json!({ "message": "Slot deleted successfully" })
        ),
        (status = 404, description = "Slot not found")
    ),
    tag = "Slots"
)]
fn doc_delete_slot_handler() {}

#[utoipa::path(
    patch,
    path = "/slots/{slot_id}/book",
    params(("slot_id" = i64, Path, description = "Slot id")),
    request_body(content = BookRequest, example = json!({ "user_id": 2 })),
    responses(
        (status = 200, description = "Slot booked", body = Slot),
        (status = 400, description = "Slot is already booked",
         example = json!({
             "detail": "Slot is already booked",
             "error": { "message": "Slot is already booked", "code": 400 }
         })
        ),
        (status = 404, description = "Slot or user not found")
    ),
    tag = "Booking"
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    patch,
    path = "/slots/{slot_id}/cancel",
    params(("slot_id" = i64, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Booking cancelled", body = Slot),
        (status = 400, description = "Slot is not booked"),
        (status = 404, description = "Slot not found")
    ),
    tag = "Booking"
)]
fn doc_cancel_slot_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        schedulink_common::handlers::health_handler,
        doc_create_user_handler,
        doc_list_users_handler,
        doc_get_user_handler,
        doc_get_user_slots_handler,
        doc_get_user_bookings_handler,
        doc_create_slot_handler,
        doc_list_slots_handler,
        doc_get_slot_handler,
        doc_update_slot_handler,
        doc_delete_slot_handler,
        doc_book_slot_handler,
        doc_cancel_slot_handler
    ),
    components(
        schemas(
            User,
            NewUser,
            Slot,
            NewSlot,
            SlotChanges,
            BookRequest,
            MessageResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "Users", description = "User registration and lookup"),
        (name = "Slots", description = "Availability slots"),
        (name = "Booking", description = "Book and cancel slots"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct SchedulinkApiDoc;
