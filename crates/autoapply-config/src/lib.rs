//! # AutoApply Config
//!
//! Configuration for the AutoApply engine. The configuration is loaded once at
//! startup and handed to each component explicitly.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
