//! Unified error system for CoffeeBloom
//!
//! - [`ErrorCode`]: numeric codes shared with the admin frontend
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`ErrorKind`]: the four ways a failure is surfaced
//! - [`AppError`]: code + message + optional details, the single reporting path
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Profile / user errors
//! - 4xxx: Task errors
//! - 5xxx: Report errors
//! - 6xxx: Staff errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorKind};
//!
//! let err = AppError::new(ErrorCode::ReportDateRequired);
//! assert_eq!(err.kind(), ErrorKind::Validation);
//!
//! let err = AppError::validation("Missing required field").with_detail("field", "uid");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod kind;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use kind::ErrorKind;
pub use types::{AppError, AppResult, ErrorBody, MessageResponse};
