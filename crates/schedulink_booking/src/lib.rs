// --- File: crates/schedulink_booking/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

pub use error::{BookingError, Entity};
pub use logic::{SchedulingState, SlotService, UserService};
pub use routes::routes;
