//! In-process entity store
//!
//! Records live in ordered maps behind a single `RwLock`. Every write,
//! including the booking compare-and-swap and the email check on insert,
//! happens under the write lock, so concurrent callers never observe a
//! half-applied change.

use crate::error::DbError;
use crate::repository::{BookingChange, EntityStore, SwapOutcome};
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, User};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    slots: BTreeMap<i64, Slot>,
    last_user_id: i64,
    last_slot_id: i64,
}

/// Entity store that keeps everything in process memory.
///
/// Each instance is independent, so tests can build one per case.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            debug!("Rejecting duplicate email: {}", user.email);
            return Err(DbError::UniqueViolation(user.email));
        }

        tables.last_user_id += 1;
        let stored = User {
            id: tables.last_user_id,
            email: user.email,
            name: user.name,
            phone: user.phone,
        };
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DbError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn insert_slot(&self, slot: NewSlot) -> Result<Slot, DbError> {
        let mut tables = self.tables.write().await;

        tables.last_slot_id += 1;
        let stored = Slot {
            id: tables.last_slot_id,
            title: slot.title,
            description: slot.description,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_booked: false,
            creator_id: slot.creator_id,
            booked_by_id: None,
        };
        tables.slots.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_slot(&self, id: i64) -> Result<Option<Slot>, DbError> {
        Ok(self.tables.read().await.slots.get(&id).cloned())
    }

    async fn list_slots(&self, filter: &SlotFilter) -> Result<Vec<Slot>, DbError> {
        Ok(self
            .tables
            .read()
            .await
            .slots
            .values()
            .filter(|slot| filter.matches(slot))
            .cloned()
            .collect())
    }

    async fn update_slot(&self, id: i64, changes: SlotChanges) -> Result<Option<Slot>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.slots.get_mut(&id).map(|slot| {
            changes.apply_to(slot);
            slot.clone()
        }))
    }

    async fn delete_slot(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.tables.write().await.slots.remove(&id).is_some())
    }

    async fn swap_booking(&self, id: i64, change: BookingChange) -> Result<SwapOutcome, DbError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.slots.get_mut(&id) else {
            return Ok(SwapOutcome::Missing);
        };

        if slot.is_booked != change.expected_booked() {
            return Ok(SwapOutcome::Conflict(slot.clone()));
        }

        match change {
            BookingChange::Book { user_id } => {
                slot.is_booked = true;
                slot.booked_by_id = Some(user_id);
            }
            BookingChange::Release => {
                slot.is_booked = false;
                slot.booked_by_id = None;
            }
        }
        Ok(SwapOutcome::Swapped(slot.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            phone: None,
        }
    }

    fn new_slot(date: &str) -> NewSlot {
        NewSlot {
            title: "Consult".to_string(),
            description: None,
            date: date.to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            creator_id: None,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.insert_slot(new_slot("2025-09-01")).await.unwrap();
        assert!(store.delete_slot(first.id).await.unwrap());
        let second = store.insert_slot(new_slot("2025-09-01")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@x.com")).await.unwrap();
        let err = store.insert_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation(ref e) if e == "a@x.com"));
        // exact match: a different case is a different email
        store.insert_user(new_user("A@x.com")).await.unwrap();
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn swap_respects_expected_state() {
        let store = MemoryStore::new();
        let slot = store.insert_slot(new_slot("2025-09-01")).await.unwrap();

        let released = store.swap_booking(slot.id, BookingChange::Release).await.unwrap();
        assert_eq!(released, SwapOutcome::Conflict(slot.clone()));

        let booked = store
            .swap_booking(slot.id, BookingChange::Book { user_id: 4 })
            .await
            .unwrap();
        let booked = match booked {
            SwapOutcome::Swapped(slot) => slot,
            other => panic!("expected swap, got {:?}", other),
        };
        assert_eq!(booked.booked_by_id, Some(4));

        let again = store
            .swap_booking(slot.id, BookingChange::Book { user_id: 5 })
            .await
            .unwrap();
        assert!(matches!(again, SwapOutcome::Conflict(s) if s.booked_by_id == Some(4)));

        assert_eq!(
            store.swap_booking(99, BookingChange::Release).await.unwrap(),
            SwapOutcome::Missing
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_swaps_have_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let slot = store.insert_slot(new_slot("2025-09-01")).await.unwrap();

        let handles: Vec<_> = (1..=8)
            .map(|user_id| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .swap_booking(slot.id, BookingChange::Book { user_id })
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in handles {
            if let SwapOutcome::Swapped(s) = handle.await.unwrap() {
                winners.push(s.booked_by_id);
            }
        }
        assert_eq!(winners.len(), 1);
        let stored = store.get_slot(slot.id).await.unwrap().unwrap();
        assert_eq!(stored.booked_by_id, winners[0]);
    }

    #[tokio::test]
    async fn update_touches_only_named_fields() {
        let store = MemoryStore::new();
        let slot = store.insert_slot(new_slot("2025-09-01")).await.unwrap();
        let changes = SlotChanges {
            end_time: Some("10:00".to_string()),
            ..SlotChanges::default()
        };
        let updated = store.update_slot(slot.id, changes.clone()).await.unwrap().unwrap();
        assert_eq!(updated.end_time, "10:00");
        assert_eq!(updated.start_time, "09:00");
        assert!(store.update_slot(42, changes).await.unwrap().is_none());
    }
}
