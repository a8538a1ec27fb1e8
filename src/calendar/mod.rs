/// Gregorian month arithmetic and header formatting.
pub mod dates;
