//! Conversions from external infrastructure errors into domain errors.

use meritsync_domain::MeritSyncError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MeritSyncError);

impl From<InfraError> for MeritSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MeritSyncError> for InfraError {
    fn from(value: MeritSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMeritSyncError {
    fn into_meritsync(self) -> MeritSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MeritSyncError */
/* -------------------------------------------------------------------------- */

impl IntoMeritSyncError for HttpError {
    fn into_meritsync(self) -> MeritSyncError {
        if self.is_timeout() {
            return MeritSyncError::Network(format!("HTTP request timed out: {self}"));
        }
        if self.is_connect() {
            return MeritSyncError::Network(format!("HTTP connection failed: {self}"));
        }
        if self.is_decode() {
            return MeritSyncError::Internal(format!("failed to decode HTTP response: {self}"));
        }
        if self.is_builder() || self.is_request() {
            return MeritSyncError::Internal(format!("failed to build HTTP request: {self}"));
        }
        MeritSyncError::Network(format!("HTTP error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_meritsync())
    }
}
