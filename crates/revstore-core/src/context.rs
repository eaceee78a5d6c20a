use revstore_core_types::RequestContext;

use crate::id::Id;

/// Per-call execution context
///
/// Carries everything the kernel would otherwise read from global state: the
/// acting principal stamped on every event and the request correlation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub actor: Id,
    pub request: RequestContext,
}

impl ExecutionContext {
    /// Context for `actor` with a fresh request id
    pub fn new(actor: Id) -> Self {
        Self {
            actor,
            request: RequestContext::new(),
        }
    }

    pub fn with_request(actor: Id, request: RequestContext) -> Self {
        Self { actor, request }
    }
}
