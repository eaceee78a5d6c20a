pub mod invariants;
pub mod validation;

pub use validation::{classify, validate_command, Classification, Limits};
