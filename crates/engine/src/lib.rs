//! Caravan Engine library.
//!
//! Application layer around the `caravan-domain` party core.
//!
//! ## Structure
//!
//! - `party_service` - Facade owning the aggregate and its ports
//! - `infrastructure` - In-memory port adapters
//! - `error` - Service-level error type

pub mod error;
pub mod infrastructure;
pub mod party_service;

pub use error::PartyError;
pub use party_service::PartyService;
