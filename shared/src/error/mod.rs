//! Unified error codes
//!
//! [`ErrorCode`] gives every command failure a stable u16 code. It travels
//! on `CommandError::error_code` next to the symbolic `CommandErrorCode`.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 8xxx: Customer / due-ledger errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::ErrorCode;
//!
//! assert_eq!(ErrorCode::TableNotFound.code(), 7001);
//! assert_eq!(ErrorCode::try_from(8001), Ok(ErrorCode::CustomerNotFound));
//! ```

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
