//! # Bookshelf Server Library
//!
//! Wiring and startup utilities for the Bookshelf server binary.

pub mod metrics;
pub mod startup;
pub mod wiring;
