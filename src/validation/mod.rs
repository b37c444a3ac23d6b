//! Submission validation.
//!
//! [`Validator::validate`] is a pure function of the raw submission and the
//! configured [`ValidationConfig`](crate::ValidationConfig).

mod submission;
mod validator;
pub use submission::*;
pub use validator::*;
