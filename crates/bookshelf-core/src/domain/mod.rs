//! Domain model.

mod book;

pub use book::*;
