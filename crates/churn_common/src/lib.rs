//! Churn Common - Shared types for the churn prediction service
//!
//! The request/response contract shared by both front doors:
//! - 18-field customer record schema with declarative domain validation
//! - Verdict type with display-only risk classification
//! - One-of prediction/error response shape

pub mod error;
pub mod record;
pub mod response;
pub mod verdict;

pub use error::*;
pub use record::*;
pub use response::*;
pub use verdict::*;
