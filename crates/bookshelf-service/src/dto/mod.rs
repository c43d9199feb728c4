//! Data Transfer Objects for the service layer.

mod book_dto;

pub use book_dto::*;
