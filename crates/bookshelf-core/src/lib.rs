//! # Bookshelf Core
//!
//! Core types, traits, and error definitions for the Bookshelf service.
//! Every other crate in the workspace builds on the error type, the `Book`
//! entity and the small set of traits defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod timeout;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use telemetry::LogFormat;
pub use result::*;
pub use timeout::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
