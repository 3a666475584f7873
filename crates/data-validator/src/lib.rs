//! Reading Validation
//!
//! Range and finiteness checks for structural readings that arrive from
//! uploaded history files rather than the generator.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
