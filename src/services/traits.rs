//! Trait abstraction for the external services to enable mocking in tests

use async_trait::async_trait;

use super::client::{ServiceError, SubmissionPayload};
use crate::state::{CepLookup, CnaeSuggestion};

/// The three remote collaborators the wizard consumes: postal-code lookup,
/// activity-code search, and the final submission endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServicesApi: Send + Sync {
    /// Resolve an 8-digit postal code into address fields
    async fn lookup_cep(&self, cep: &str) -> Result<CepLookup, ServiceError>;

    /// Search activity codes by free text; an empty list is a valid response
    async fn search_cnae(&self, query: &str) -> Result<Vec<CnaeSuggestion>, ServiceError>;

    /// Send the full form payload; returns the confirmation identifier
    async fn submit(&self, payload: SubmissionPayload) -> Result<String, ServiceError>;
}
