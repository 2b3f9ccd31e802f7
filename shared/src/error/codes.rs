//! Unified error codes for CoffeeBloom
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Profile / user errors
//! - 4xxx: Task errors
//! - 5xxx: Report errors
//! - 6xxx: Staff (employee / shift) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so the admin frontend can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Email is already registered
    EmailAlreadyRegistered = 1006,
    /// Password too short
    PasswordTooShort = 1007,
    /// Registration key not recognized
    RegistrationKeyInvalid = 1008,
    /// Password reset link expired or already used
    ResetLinkExpired = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// One of the route's roles is required
    RoleRequired = 2002,
    /// Store belongs to another profile's scope
    StoreAccessDenied = 2003,

    // ==================== 3xxx: Profile ====================
    /// Profile record not found
    ProfileNotFound = 3001,
    /// Profile has no store assigned
    NoStoreAssigned = 3002,
    /// Identity-provider account not found
    AccountNotFound = 3003,

    // ==================== 4xxx: Task ====================
    /// Task not found
    TaskNotFound = 4001,
    /// Task title is required
    TaskTitleRequired = 4002,
    /// Task schedule is invalid
    TaskScheduleInvalid = 4003,

    // ==================== 5xxx: Report ====================
    /// Report not found
    ReportNotFound = 5001,
    /// Report date is required
    ReportDateRequired = 5002,
    /// Report needs an assigned store
    ReportStoreRequired = 5003,
    /// Report contains an invalid amount
    ReportInvalidAmount = 5004,
    /// Line item references an unknown catalog item
    ReportItemUnknown = 5005,

    // ==================== 6xxx: Staff ====================
    /// Employee not found
    EmployeeNotFound = 6001,
    /// Employee data invalid
    EmployeeInvalid = 6002,
    /// Shift not found
    ShiftNotFound = 6101,
    /// Shift end is not after its start
    ShiftTimeInvalid = 6102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Identity provider call failed
    RemoteCallFailed = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password is too short",
            ErrorCode::RegistrationKeyInvalid => "Invalid registration key",
            ErrorCode::ResetLinkExpired => "Password reset link has expired",

            // Permission
            ErrorCode::PermissionDenied => "Access denied",
            ErrorCode::RoleRequired => "A required role is missing",
            ErrorCode::StoreAccessDenied => "Store is outside your scope",

            // Profile
            ErrorCode::ProfileNotFound => "User profile not found",
            ErrorCode::NoStoreAssigned => "Your account has no store assigned",
            ErrorCode::AccountNotFound => "Account not found",

            // Task
            ErrorCode::TaskNotFound => "Task not found",
            ErrorCode::TaskTitleRequired => "Task title is required",
            ErrorCode::TaskScheduleInvalid => "Task schedule is invalid",

            // Report
            ErrorCode::ReportNotFound => "Report not found",
            ErrorCode::ReportDateRequired => "Please select a date",
            ErrorCode::ReportStoreRequired => "Your account has no store assigned",
            ErrorCode::ReportInvalidAmount => "Report contains an invalid amount",
            ErrorCode::ReportItemUnknown => "Unknown menu item",

            // Staff
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeInvalid => "Employee data is invalid",
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftTimeInvalid => "Shift must end after it starts",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RemoteCallFailed => "Identity provider call failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::EmailAlreadyRegistered),
            1007 => Ok(ErrorCode::PasswordTooShort),
            1008 => Ok(ErrorCode::RegistrationKeyInvalid),
            1009 => Ok(ErrorCode::ResetLinkExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::StoreAccessDenied),

            // Profile
            3001 => Ok(ErrorCode::ProfileNotFound),
            3002 => Ok(ErrorCode::NoStoreAssigned),
            3003 => Ok(ErrorCode::AccountNotFound),

            // Task
            4001 => Ok(ErrorCode::TaskNotFound),
            4002 => Ok(ErrorCode::TaskTitleRequired),
            4003 => Ok(ErrorCode::TaskScheduleInvalid),

            // Report
            5001 => Ok(ErrorCode::ReportNotFound),
            5002 => Ok(ErrorCode::ReportDateRequired),
            5003 => Ok(ErrorCode::ReportStoreRequired),
            5004 => Ok(ErrorCode::ReportInvalidAmount),
            5005 => Ok(ErrorCode::ReportItemUnknown),

            // Staff
            6001 => Ok(ErrorCode::EmployeeNotFound),
            6002 => Ok(ErrorCode::EmployeeInvalid),
            6101 => Ok(ErrorCode::ShiftNotFound),
            6102 => Ok(ErrorCode::ShiftTimeInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::RemoteCallFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
