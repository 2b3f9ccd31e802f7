//! Coarse error kinds
//!
//! Every [`ErrorCode`] folds into one of four kinds. Callers that only need to
//! decide *how* to surface a failure (inline field error, login redirect,
//! "not found" view, transient notification) switch on the kind instead of
//! the individual code.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input caught before anything was persisted
    Validation,
    /// Missing/invalid identity or a denied role check
    Unauthorized,
    /// Addressed record does not exist
    NotFound,
    /// Storage or identity-provider failure
    RemoteFailure,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::NotFound
            | ErrorCode::ProfileNotFound
            | ErrorCode::AccountNotFound
            | ErrorCode::TaskNotFound
            | ErrorCode::ReportNotFound
            | ErrorCode::EmployeeNotFound
            | ErrorCode::ShiftNotFound => ErrorKind::NotFound,

            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid
            | ErrorCode::AccountDisabled
            | ErrorCode::ResetLinkExpired
            | ErrorCode::PermissionDenied
            | ErrorCode::RoleRequired
            | ErrorCode::StoreAccessDenied => ErrorKind::Unauthorized,

            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::RemoteCallFailed => ErrorKind::RemoteFailure,

            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ErrorCode::ReportDateRequired.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::NoStoreAssigned.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::PermissionDenied.kind(), ErrorKind::Unauthorized);
        assert_eq!(ErrorCode::NotAuthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(ErrorCode::TaskNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::RemoteFailure);
        assert_eq!(ErrorCode::RemoteCallFailed.kind(), ErrorKind::RemoteFailure);
    }
}
