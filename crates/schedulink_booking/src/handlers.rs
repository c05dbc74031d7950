// --- File: crates/schedulink_booking/src/handlers.rs ---
use crate::logic::SchedulingState;
use axum::{extract::State, http::StatusCode, response::Json};
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, User};
use schedulink_common::{validation_error, SchedulinkError, ValidJson, ValidPath, ValidQuery};
use schedulink_db::EntityStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

type SharedState<S> = State<Arc<SchedulingState<S>>>;

/// Query string accepted by `GET /slots`.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotQuery {
    /// Exact date, `YYYY-MM-DD`
    pub date: Option<String>,
    pub is_booked: Option<bool>,
    /// Creator of the slot
    pub user_id: Option<i64>,
}

impl From<SlotQuery> for SlotFilter {
    fn from(query: SlotQuery) -> Self {
        SlotFilter {
            date: query.date,
            is_booked: query.is_booked,
            creator_id: query.user_id,
            booked_by_id: None,
        }
    }
}

/// Body of `PATCH /slots/{id}/book`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), SchedulinkError> {
    if value.trim().is_empty() {
        return Err(validation_error(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_new_user(user: &NewUser) -> Result<(), SchedulinkError> {
    require_non_empty("email", &user.email)?;
    require_non_empty("name", &user.name)
}

fn validate_changes(changes: &SlotChanges) -> Result<(), SchedulinkError> {
    if let Some(title) = &changes.title {
        require_non_empty("title", title)?;
    }
    Ok(())
}

// --- Users ---

pub async fn create_user_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidJson(payload): ValidJson<NewUser>,
) -> Result<Json<User>, SchedulinkError> {
    validate_new_user(&payload)?;
    let user = state.users.create_user(payload).await?;
    Ok(Json(user))
}

pub async fn list_users_handler<S: EntityStore>(
    State(state): SharedState<S>,
) -> Result<Json<Vec<User>>, SchedulinkError> {
    Ok(Json(state.users.list_users().await?))
}

pub async fn get_user_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(user_id): ValidPath<i64>,
) -> Result<Json<User>, SchedulinkError> {
    Ok(Json(state.users.get_user(user_id).await?))
}

pub async fn get_user_slots_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(user_id): ValidPath<i64>,
) -> Result<Json<Vec<Slot>>, SchedulinkError> {
    Ok(Json(state.slots.get_slots_for_creator(user_id).await?))
}

pub async fn get_user_bookings_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(user_id): ValidPath<i64>,
) -> Result<Json<Vec<Slot>>, SchedulinkError> {
    Ok(Json(state.slots.get_bookings_for_user(user_id).await?))
}

// --- Slots ---

pub async fn create_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidJson(payload): ValidJson<NewSlot>,
) -> Result<Json<Slot>, SchedulinkError> {
    require_non_empty("title", &payload.title)?;
    let slot = state.slots.create_slot(payload).await?;
    Ok(Json(slot))
}

pub async fn list_slots_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidQuery(query): ValidQuery<SlotQuery>,
) -> Result<Json<Vec<Slot>>, SchedulinkError> {
    let filter = SlotFilter::from(query);
    Ok(Json(state.slots.list_slots(&filter).await?))
}

pub async fn get_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(slot_id): ValidPath<i64>,
) -> Result<Json<Slot>, SchedulinkError> {
    Ok(Json(state.slots.get_slot(slot_id).await?))
}

pub async fn update_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(slot_id): ValidPath<i64>,
    ValidJson(changes): ValidJson<SlotChanges>,
) -> Result<Json<Slot>, SchedulinkError> {
    validate_changes(&changes)?;
    Ok(Json(state.slots.update_slot(slot_id, changes).await?))
}

pub async fn delete_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(slot_id): ValidPath<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), SchedulinkError> {
    state.slots.delete_slot(slot_id).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Slot deleted successfully".to_string(),
        }),
    ))
}

pub async fn book_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(slot_id): ValidPath<i64>,
    ValidJson(payload): ValidJson<BookRequest>,
) -> Result<Json<Slot>, SchedulinkError> {
    info!("Booking request for slot {} by user {}", slot_id, payload.user_id);
    Ok(Json(state.slots.book(slot_id, payload.user_id).await?))
}

pub async fn cancel_slot_handler<S: EntityStore>(
    State(state): SharedState<S>,
    ValidPath(slot_id): ValidPath<i64>,
) -> Result<Json<Slot>, SchedulinkError> {
    info!("Cancellation request for slot {}", slot_id);
    Ok(Json(state.slots.cancel(slot_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: name.to_string(),
            phone: None,
        }
    }

    #[test]
    fn user_validation() {
        assert!(validate_new_user(&user("a@x.com", "Ana")).is_ok());
        assert!(validate_new_user(&user("", "Ana")).is_err());
        assert!(validate_new_user(&user("a@x.com", "   ")).is_err());
        // no format rule beyond non-empty
        assert!(validate_new_user(&user("not-an-email", "Ana")).is_ok());
    }

    #[test]
    fn empty_title_change_is_rejected() {
        let changes = SlotChanges {
            title: Some(String::new()),
            ..SlotChanges::default()
        };
        assert!(validate_changes(&changes).is_err());
        assert!(validate_changes(&SlotChanges::default()).is_ok());
    }

    #[test]
    fn query_maps_user_id_to_creator() {
        let filter = SlotFilter::from(SlotQuery {
            date: Some("2025-09-01".to_string()),
            is_booked: Some(false),
            user_id: Some(3),
        });
        assert_eq!(filter.creator_id, Some(3));
        assert_eq!(filter.booked_by_id, None);
        assert_eq!(filter.date.as_deref(), Some("2025-09-01"));
    }
}
