//! # Bookshelf Service
//!
//! Orchestrates each book operation: validate input, consult the
//! look-aside cache, call the store, invalidate stale cache entries and
//! hand a notification to the publisher.

pub mod book_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;

pub use book_service::*;
pub use cache::*;
pub use dto::*;
pub use r#impl::{BookServiceImpl, BookServiceSettings};
