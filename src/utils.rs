use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

pub mod age;
pub mod error;
pub mod pagination;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Checks that `value` is shaped like `YYYY-MM-DD`. Calendar validity is left to the parser.
pub fn validate_date_format(value: &str) -> Result<(), ValidationError> {
  if !DATE_SHAPE.is_match(value) {
    return Err(ValidationError::new("date_format").with_message("dob must be in YYYY-MM-DD format".into()));
  }

  Ok(())
}

/// One `"<field> validation failed on <code>"` entry per failed rule, sorted by field.
pub fn validation_details(errors: &ValidationErrors) -> Vec<String> {
  let mut details: Vec<String> = errors
    .field_errors()
    .into_iter()
    .flat_map(|(field, errors)| {
      errors
        .iter()
        .map(move |error| format!("{} validation failed on {}", field, error.code))
    })
    .collect();
  details.sort();
  details
}
