//! Entity store abstraction
//!
//! The booking services only ever talk to [`EntityStore`]. Two
//! implementations exist: [`crate::MemoryStore`] for tests and single-process
//! deployments, and [`crate::SqlEntityStore`] for durable storage.

use crate::error::DbError;
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, User};
use std::future::Future;

/// A booking transition to apply atomically.
///
/// Each variant carries its own precondition: `Book` only applies to an
/// available slot, `Release` only to a booked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingChange {
    /// Available -> booked by `user_id`
    Book { user_id: i64 },
    /// Booked -> available
    Release,
}

impl BookingChange {
    /// The `is_booked` value the slot must currently have.
    pub fn expected_booked(&self) -> bool {
        matches!(self, BookingChange::Release)
    }
}

/// Result of a compare-and-swap on a slot's booking fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The change was applied; carries the updated slot.
    Swapped(Slot),
    /// The slot was not in the expected state; carries the slot as found.
    Conflict(Slot),
    /// No slot with that id exists.
    Missing,
}

/// Keyed storage for users and slots.
///
/// Ids are assigned by the store and never reused. Listings are ordered by
/// ascending id.
pub trait EntityStore: Send + Sync + 'static {
    /// Insert a user.
    ///
    /// Fails with [`DbError::UniqueViolation`] if the email is taken; the
    /// check and the insert happen atomically.
    fn insert_user(&self, user: NewUser) -> impl Future<Output = Result<User, DbError>> + Send;

    /// Read a user by id.
    fn get_user(&self, id: i64) -> impl Future<Output = Result<Option<User>, DbError>> + Send;

    /// All users.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, DbError>> + Send;

    /// Insert a slot in the available state.
    fn insert_slot(&self, slot: NewSlot) -> impl Future<Output = Result<Slot, DbError>> + Send;

    /// Read a slot by id.
    fn get_slot(&self, id: i64) -> impl Future<Output = Result<Option<Slot>, DbError>> + Send;

    /// Slots matching every predicate set in `filter`.
    fn list_slots(
        &self,
        filter: &SlotFilter,
    ) -> impl Future<Output = Result<Vec<Slot>, DbError>> + Send;

    /// Apply a partial update to a slot's descriptive fields.
    ///
    /// Returns `None` if the slot does not exist.
    fn update_slot(
        &self,
        id: i64,
        changes: SlotChanges,
    ) -> impl Future<Output = Result<Option<Slot>, DbError>> + Send;

    /// Remove a slot. Returns `false` if it did not exist.
    fn delete_slot(&self, id: i64) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Atomically apply `change` if the slot is in the state it expects.
    fn swap_booking(
        &self,
        id: i64,
        change: BookingChange,
    ) -> impl Future<Output = Result<SwapOutcome, DbError>> + Send;
}

/// A trait for store factories, generic over the store and what it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new store instance from `config`.
    fn create_repository(&self, config: C) -> R;
}
