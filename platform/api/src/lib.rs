//! Wire-level response types shared by every HTTP endpoint.

mod envelope;
mod error;

pub use envelope::{Empty, FieldErrors, Outcome};
pub use error::{ApiError, ApiResult};
