// --- File: crates/schedulink_common/src/models.rs ---

// Records shared by the store and the booking service, plus the inputs used
// to create, change and query them. Dates and times are kept as the exact
// strings supplied by clients (`YYYY-MM-DD`, `HH:MM`).

use serde::{Deserialize, Deserializer, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique, compared exactly
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Fields needed to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUser {
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A bookable time interval.
///
/// `booked_by_id` is `Some` exactly when `is_booked` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Slot {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-09-01"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:30"))]
    pub end_time: String,
    pub is_booked: bool,
    /// The user who created the slot, if any
    #[serde(rename = "user_id")]
    pub creator_id: Option<i64>,
    /// The user currently holding the booking, if any
    #[serde(rename = "booked_by_user_id")]
    pub booked_by_id: Option<i64>,
}

/// Booking state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Booked { by: i64 },
}

impl Slot {
    /// The booking state, or `None` if the two booking fields disagree.
    pub fn state(&self) -> Option<SlotState> {
        match (self.is_booked, self.booked_by_id) {
            (false, None) => Some(SlotState::Available),
            (true, Some(by)) => Some(SlotState::Booked { by }),
            _ => None,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.state().is_some()
    }
}

/// Fields needed to create a slot. New slots are always available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewSlot {
    #[cfg_attr(feature = "openapi", schema(example = "Consult"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-09-01"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:30"))]
    pub end_time: String,
    #[serde(default, rename = "user_id")]
    pub creator_id: Option<i64>,
}

/// A partial update of a slot's descriptive fields.
///
/// `None` leaves a field untouched. `description` also tells an absent key
/// (`None`) apart from an explicit `null` (`Some(None)`), which clears it.
/// Booking fields can only change through book/cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl SlotChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    /// Applies the present fields to `slot`.
    pub fn apply_to(self, slot: &mut Slot) {
        if let Some(title) = self.title {
            slot.title = title;
        }
        if let Some(description) = self.description {
            slot.description = description;
        }
        if let Some(date) = self.date {
            slot.date = date;
        }
        if let Some(start_time) = self.start_time {
            slot.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            slot.end_time = end_time;
        }
    }
}

/// Marks a key that was present in the input, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Exact-match predicates for listing slots, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFilter {
    pub date: Option<String>,
    pub is_booked: Option<bool>,
    pub creator_id: Option<i64>,
    pub booked_by_id: Option<i64>,
}

impl SlotFilter {
    pub fn created_by(user_id: i64) -> Self {
        Self {
            creator_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn booked_by(user_id: i64) -> Self {
        Self {
            booked_by_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, slot: &Slot) -> bool {
        self.date.as_ref().map_or(true, |d| &slot.date == d)
            && self.is_booked.map_or(true, |b| slot.is_booked == b)
            && self.creator_id.map_or(true, |id| slot.creator_id == Some(id))
            && self.booked_by_id.map_or(true, |id| slot.booked_by_id == Some(id))
    }
}
