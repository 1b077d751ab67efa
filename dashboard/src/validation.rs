//! Form field validation shared by the task and event write routes.

/// Longest description the store accepts.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Reasons a submitted form is rejected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A description is required.")]
    EmptyDescription,
    #[error("The description must be at most {max} characters long (got {len}).")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("Priority must be a whole number, got '{0}'.")]
    InvalidPriority(String),
    #[error("A date is required.")]
    MissingDate,
    #[error("Date must be a valid calendar date in YYYY-MM-DD form, got '{0}'.")]
    InvalidDate(String),
}

/// Trims a submitted description and checks it is present and fits the column.
pub fn parse_description(raw: Option<&str>) -> Result<String, ValidationError> {
    let description = raw.map(str::trim).unwrap_or_default();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(description.to_string())
}

/// Treats a missing or whitespace-only form field as absent.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
