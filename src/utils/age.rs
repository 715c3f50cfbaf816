use chrono::{Datelike, NaiveDate};

/// Whole years elapsed between `dob` and `today`.
///
/// The birthday itself counts as reached, so the age increments on the exact
/// (month, day) of birth. A leap-day birthday is compared the same way and is
/// therefore reached on March 1st in non-leap years.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
  let age = today.year() - dob.year();

  if (today.month(), today.day()) < (dob.month(), dob.day()) {
    age - 1
  } else {
    age
  }
}
