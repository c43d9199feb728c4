//! Request extractors and body decoding.
//!
//! Every rejection renders as `{"error": ...}` like handler errors do.

mod body;
mod pagination;
mod path;
mod payload;

pub use body::*;
pub use pagination::*;
pub use path::*;
pub use payload::*;
