//! Party service errors.

use caravan_domain::DomainError;

/// Errors surfaced by [`crate::party_service::PartyService`].
///
/// Almost every party operation clamps or no-ops instead of failing;
/// only the defensively guarded ones bubble a domain error up.
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
