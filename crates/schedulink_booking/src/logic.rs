// --- File: crates/schedulink_booking/src/logic.rs ---
//! User and slot services.
//!
//! Both services are generic over the [`EntityStore`] they are handed at
//! construction, so the same code runs against the in-memory store in tests
//! and the SQL store in production.
//!
//! Booking and cancelling read the slot to report the right error, then
//! commit through [`EntityStore::swap_booking`]. The swap only applies if the
//! slot is still in the state that was read, so a concurrent caller that got
//! there first turns into `AlreadyBooked` / `NotBooked` instead of a double
//! booking.

use crate::error::{BookingError, Entity};
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, User};
use schedulink_db::{BookingChange, DbError, EntityStore, SwapOutcome};
use std::sync::Arc;
use tracing::{debug, error, info};

fn log_store_error(err: DbError) -> BookingError {
    error!("Entity store failure: {}", err);
    BookingError::Store(err)
}

/// Creates and reads users.
pub struct UserService<S> {
    store: Arc<S>,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: EntityStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Fails with [`BookingError::DuplicateEmail`] if the exact email is
    /// already taken.
    pub async fn create_user(&self, user: NewUser) -> Result<User, BookingError> {
        let created = self.store.insert_user(user).await.map_err(|e| match e {
            DbError::UniqueViolation(email) => {
                info!("Email already registered: {}", email);
                BookingError::DuplicateEmail
            }
            other => log_store_error(other),
        })?;
        info!("Created user {} <{}>", created.id, created.email);
        Ok(created)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, BookingError> {
        debug!("Looking up user {}", id);
        self.store
            .get_user(id)
            .await
            .map_err(log_store_error)?
            .ok_or(BookingError::NotFound(Entity::User))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, BookingError> {
        self.store.list_users().await.map_err(log_store_error)
    }
}

/// Creates, lists, edits and books slots.
pub struct SlotService<S> {
    store: Arc<S>,
    users: UserService<S>,
}

impl<S> Clone for SlotService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            users: self.users.clone(),
        }
    }
}

impl<S: EntityStore> SlotService<S> {
    pub fn new(store: Arc<S>, users: UserService<S>) -> Self {
        Self { store, users }
    }

    /// Create an available slot, checking the creator if one is named.
    pub async fn create_slot(&self, slot: NewSlot) -> Result<Slot, BookingError> {
        if let Some(creator_id) = slot.creator_id {
            self.users.get_user(creator_id).await?;
        }
        let created = self.store.insert_slot(slot).await.map_err(log_store_error)?;
        info!(
            "Created slot {} on {} {}-{}",
            created.id, created.date, created.start_time, created.end_time
        );
        Ok(created)
    }

    pub async fn get_slot(&self, id: i64) -> Result<Slot, BookingError> {
        debug!("Looking up slot {}", id);
        self.store
            .get_slot(id)
            .await
            .map_err(log_store_error)?
            .ok_or(BookingError::NotFound(Entity::Slot))
    }

    /// Slots matching `filter`, ordered by id.
    pub async fn list_slots(&self, filter: &SlotFilter) -> Result<Vec<Slot>, BookingError> {
        debug!("Listing slots with {:?}", filter);
        self.store.list_slots(filter).await.map_err(log_store_error)
    }

    /// Edit the descriptive fields of a slot. Booking state is untouched.
    pub async fn update_slot(&self, id: i64, changes: SlotChanges) -> Result<Slot, BookingError> {
        let updated = self
            .store
            .update_slot(id, changes)
            .await
            .map_err(log_store_error)?
            .ok_or(BookingError::NotFound(Entity::Slot))?;
        info!("Updated slot {}", id);
        Ok(updated)
    }

    /// Remove a slot, booked or not.
    pub async fn delete_slot(&self, id: i64) -> Result<(), BookingError> {
        if !self.store.delete_slot(id).await.map_err(log_store_error)? {
            return Err(BookingError::NotFound(Entity::Slot));
        }
        info!("Deleted slot {}", id);
        Ok(())
    }

    /// Book an available slot for `booker_id`.
    ///
    /// Checks run in this order: the slot exists, it is available, the
    /// booker exists.
    pub async fn book(&self, slot_id: i64, booker_id: i64) -> Result<Slot, BookingError> {
        let slot = self.get_slot(slot_id).await?;
        if slot.is_booked {
            return Err(BookingError::AlreadyBooked);
        }
        self.users.get_user(booker_id).await?;

        let change = BookingChange::Book { user_id: booker_id };
        match self.store.swap_booking(slot_id, change).await.map_err(log_store_error)? {
            SwapOutcome::Swapped(slot) => {
                info!("Slot {} booked by user {}", slot_id, booker_id);
                Ok(slot)
            }
            SwapOutcome::Conflict(_) => {
                info!("Slot {} was booked concurrently", slot_id);
                Err(BookingError::AlreadyBooked)
            }
            SwapOutcome::Missing => Err(BookingError::NotFound(Entity::Slot)),
        }
    }

    /// Release a booked slot.
    pub async fn cancel(&self, slot_id: i64) -> Result<Slot, BookingError> {
        let slot = self.get_slot(slot_id).await?;
        if !slot.is_booked {
            return Err(BookingError::NotBooked);
        }

        match self
            .store
            .swap_booking(slot_id, BookingChange::Release)
            .await
            .map_err(log_store_error)?
        {
            SwapOutcome::Swapped(slot) => {
                info!("Booking on slot {} cancelled", slot_id);
                Ok(slot)
            }
            SwapOutcome::Conflict(_) => {
                info!("Slot {} was cancelled concurrently", slot_id);
                Err(BookingError::NotBooked)
            }
            SwapOutcome::Missing => Err(BookingError::NotFound(Entity::Slot)),
        }
    }

    /// Slots created by an existing user.
    pub async fn get_slots_for_creator(&self, user_id: i64) -> Result<Vec<Slot>, BookingError> {
        self.users.get_user(user_id).await?;
        self.list_slots(&SlotFilter::created_by(user_id)).await
    }

    /// Slots currently booked by an existing user.
    pub async fn get_bookings_for_user(&self, user_id: i64) -> Result<Vec<Slot>, BookingError> {
        self.users.get_user(user_id).await?;
        self.list_slots(&SlotFilter::booked_by(user_id)).await
    }
}

/// Both services over one shared store.
pub struct SchedulingState<S> {
    pub users: UserService<S>,
    pub slots: SlotService<S>,
}

impl<S: EntityStore> SchedulingState<S> {
    pub fn new(store: Arc<S>) -> Self {
        let users = UserService::new(store.clone());
        let slots = SlotService::new(store, users.clone());
        Self { users, slots }
    }
}
