pub mod field_state;
pub mod model_state;
pub mod object_state;
pub mod revision;

pub use field_state::FieldState;
pub use model_state::{FieldKey, ModelState};
pub use object_state::ObjectState;
pub use revision::{CommandOutcome, ModelRevision};
