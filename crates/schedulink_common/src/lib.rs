// --- File: crates/schedulink_common/src/lib.rs ---

pub mod error; // Error handling
pub mod extract; // Request extractors
pub mod handlers; // Liveness handlers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared records
pub mod routes; // Liveness routes

pub use routes::routes;

pub use error::{
    business_rule, internal_error, not_found, validation_error, HttpStatusCode, SchedulinkError,
};

pub use extract::{ValidJson, ValidPath, ValidQuery};

pub use http::IntoHttpResponse;

pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, SlotState, User};
