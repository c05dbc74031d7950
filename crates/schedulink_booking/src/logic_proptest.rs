// --- File: crates/schedulink_booking/src/logic_proptest.rs ---
#[cfg(test)]
mod tests {
    use crate::error::BookingError;
    use crate::logic::SchedulingState;
    use proptest::prelude::*;
    use schedulink_common::models::{NewSlot, NewUser, SlotChanges, SlotFilter};
    use schedulink_db::MemoryStore;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    enum Op {
        Book { slot: usize, user: i64 },
        Cancel { slot: usize },
        Retitle { slot: usize },
        Delete { slot: usize },
        Create,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..4usize, 1..5i64).prop_map(|(slot, user)| Op::Book { slot, user }),
            3 => (0..4usize).prop_map(|slot| Op::Cancel { slot }),
            1 => (0..4usize).prop_map(|slot| Op::Retitle { slot }),
            1 => (0..4usize).prop_map(|slot| Op::Delete { slot }),
            1 => Just(Op::Create),
        ]
    }

    fn new_slot() -> NewSlot {
        NewSlot {
            title: "Consultation".to_string(),
            description: None,
            date: "2025-09-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            creator_id: None,
        }
    }

    proptest! {
        // Every slot stays consistent and matches a simple model of who holds it
        #[test]
        fn test_booking_invariant_holds(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let state = SchedulingState::new(Arc::new(MemoryStore::new()));
                // users 1..=3 exist, 4 does not
                for n in 1..=3 {
                    state
                        .users
                        .create_user(NewUser {
                            email: format!("user{}@example.com", n),
                            name: format!("User {}", n),
                            phone: None,
                        })
                        .await
                        .unwrap();
                }

                let mut ids = Vec::new();
                let mut model: HashMap<i64, Option<i64>> = HashMap::new();
                for _ in 0..3 {
                    let slot = state.slots.create_slot(new_slot()).await.unwrap();
                    ids.push(slot.id);
                    model.insert(slot.id, None);
                }

                for op in ops {
                    match op {
                        Op::Book { slot, user } => {
                            let Some(&id) = ids.get(slot) else { continue };
                            let result = state.slots.book(id, user).await;
                            match model.get(&id).copied() {
                                None => assert!(matches!(result, Err(BookingError::NotFound(_)))),
                                Some(Some(_)) => {
                                    assert!(matches!(result, Err(BookingError::AlreadyBooked)))
                                }
                                Some(None) if user > 3 => {
                                    assert!(matches!(result, Err(BookingError::NotFound(_))))
                                }
                                Some(None) => {
                                    assert!(result.is_ok());
                                    model.insert(id, Some(user));
                                }
                            }
                        }
                        Op::Cancel { slot } => {
                            let Some(&id) = ids.get(slot) else { continue };
                            let result = state.slots.cancel(id).await;
                            match model.get(&id).copied() {
                                None => assert!(matches!(result, Err(BookingError::NotFound(_)))),
                                Some(None) => {
                                    assert!(matches!(result, Err(BookingError::NotBooked)))
                                }
                                Some(Some(_)) => {
                                    assert!(result.is_ok());
                                    model.insert(id, None);
                                }
                            }
                        }
                        Op::Retitle { slot } => {
                            let Some(&id) = ids.get(slot) else { continue };
                            let changes = SlotChanges {
                                title: Some(format!("Slot {}", id)),
                                ..SlotChanges::default()
                            };
                            let result = state.slots.update_slot(id, changes).await;
                            assert_eq!(result.is_ok(), model.contains_key(&id));
                        }
                        Op::Delete { slot } => {
                            let Some(&id) = ids.get(slot) else { continue };
                            let result = state.slots.delete_slot(id).await;
                            assert_eq!(result.is_ok(), model.remove(&id).is_some());
                        }
                        Op::Create => {
                            let slot = state.slots.create_slot(new_slot()).await.unwrap();
                            ids.push(slot.id);
                            model.insert(slot.id, None);
                        }
                    }

                    let slots = state.slots.list_slots(&SlotFilter::default()).await.unwrap();
                    assert_eq!(slots.len(), model.len());
                    for slot in slots {
                        assert_eq!(slot.booked_by_id.is_some(), slot.is_booked);
                        assert_eq!(model.get(&slot.id).copied(), Some(slot.booked_by_id));
                    }
                }
            });
        }
    }
}
