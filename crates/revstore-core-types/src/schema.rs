//! Field keys and event names of the structured operation log
//!
//! Every lifecycle record carries `component`, `op` and `event`. `end` and
//! `end_error` records add `duration_ms`; `end_error` also adds the error
//! kind, its stable code and the rendered error.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Command context
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_ACTOR_ID: &str = "actor_id";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_CHANGE_TYPE: &str = "change_type";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_INTENT: &str = "intent";

// Results
pub const FIELD_OUTCOME: &str = "outcome";
pub const FIELD_EVENT_COUNT: &str = "event_count";
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_MESSAGE: &str = "err_message";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
