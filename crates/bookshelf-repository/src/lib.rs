//! # Bookshelf Repository
//!
//! Store adapter for books.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn BookRepository>       (domain interface)
//! MySqlBookRepository                (SQLx implementation)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
