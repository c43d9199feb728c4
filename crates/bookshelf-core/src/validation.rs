//! Validation utilities.

use crate::BookshelfError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and reports only the first failing field,
    /// checking fields in the given order.
    ///
    /// Fields missing from `order` are checked afterwards, alphabetically.
    fn validate_in_order(&self, order: &[&str]) -> Result<(), BookshelfError> {
        self.validate()
            .map_err(|errors| first_validation_error(&errors, order))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` into a single `BookshelfError`
/// carrying the message of the first failing field.
#[must_use]
pub fn first_validation_error(errors: &ValidationErrors, order: &[&str]) -> BookshelfError {
    let field_errors = errors.field_errors();

    let mut remaining: Vec<&str> = field_errors
        .keys()
        .map(AsRef::as_ref)
        .filter(|field| !order.contains(field))
        .collect();
    remaining.sort_unstable();

    order
        .iter()
        .copied()
        .chain(remaining)
        .find_map(|field| field_errors.get(field).and_then(|errs| errs.first()).map(|err| (field, err)))
        .map_or_else(
            || BookshelfError::Validation("Invalid request".to_string()),
            |(field, err)| {
                let message = err
                    .message
                    .as_ref()
                    .map_or_else(|| format!("Invalid field '{field}'"), ToString::to_string);
                BookshelfError::Validation(message)
            },
        )
}
