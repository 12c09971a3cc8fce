use validator::{Validate, ValidationErrors};

use crate::domain::DomainError;

/// Run `validator` rules on `input`, folding field failures into a single
/// `DomainError::Validation`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), DomainError> {
    input.validate().map_err(|errors| validation_error(&errors))
}

/// Messages are sorted by field name so the output is stable.
pub fn validation_error(errors: &ValidationErrors) -> DomainError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code));
                (field.to_string(), msg)
            })
        })
        .collect();
    field_errors.sort();

    let message = if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors
            .into_iter()
            .map(|(_, msg)| msg)
            .collect::<Vec<_>>()
            .join("; ")
    };

    DomainError::validation(message)
}
