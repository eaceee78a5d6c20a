use std::fmt;

use revstore_core_types::RequestContext;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse classification of a `StoreError` with a stable code
///
/// `Failed` and `NoChange` are outcomes, not errors, and have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    InvalidId,
    InvalidAddress,
    /// Address or command shape the engine can never accept
    RequestError,
    IllegalArgument,
    TransactionTooLarge,
    InvariantViolation,
    Serialization,
    Config,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidId => "ERR_INVALID_ID",
            ExErrorKind::InvalidAddress => "ERR_INVALID_ADDRESS",
            ExErrorKind::RequestError => "ERR_REQUEST",
            ExErrorKind::IllegalArgument => "ERR_ILLEGAL_ARGUMENT",
            ExErrorKind::TransactionTooLarge => "ERR_TRANSACTION_TOO_LARGE",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// A `StoreError` flattened for reporting at the engine boundary
///
/// Keeps the kind, the rendered message and whatever context the boundary
/// knows: the operation, the address involved and the request correlation.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    message: String,
    op: Option<String>,
    address: Option<String>,
    request: Option<RequestContext>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            message: String::new(),
            op: None,
            address: None,
            request: None,
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn with_op(self, op: impl Into<String>) -> Self {
        Self {
            op: Some(op.into()),
            ..self
        }
    }

    pub fn with_address(self, address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..self
        }
    }

    pub fn with_request(self, request: RequestContext) -> Self {
        Self {
            request: Some(request),
            ..self
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn request(&self) -> Option<&RequestContext> {
        self.request.as_ref()
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())?;
        if let Some(op) = &self.op {
            write!(f, " during {}", op)?;
        }
        if let Some(address) = &self.address {
            write!(f, " at {}", address)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(request) = &self.request {
            write!(f, " [request {}]", request.request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Error taxonomy for revstore operations
///
/// Only request-level mistakes and internal faults are errors. A command that
/// is rejected by its preconditions is reported as `CommandOutcome::Failed`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    // ===== Request Errors =====
    /// Id text is not a well-formed identifier
    #[error("Invalid id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// Address text or structure is malformed
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Address has the wrong addressed type for the operation
    #[error("Address {address} addresses a {actual}, expected a {expected}")]
    AddressTypeMismatch {
        address: String,
        expected: String,
        actual: String,
    },

    /// Address belongs to a different repository than the engine serves
    #[error("Address {address} is outside repository {repository}")]
    ForeignRepository { address: String, repository: String },

    /// Command combines level, change type and payload illegally
    #[error("Malformed command on {address}: {reason}")]
    MalformedCommand { address: String, reason: String },

    /// Transaction contains a command that is not strictly below its target
    #[error("Command on {address} is outside transaction target {target}")]
    CommandOutsideTarget { address: String, target: String },

    /// Transaction exceeds the configured command limit
    #[error("Transaction on {target} has {count} commands, limit is {limit}")]
    TransactionTooLarge {
        target: String,
        count: usize,
        limit: usize,
    },

    // ===== Argument Errors =====
    /// A required parameter is missing
    #[error("Illegal argument '{parameter}': {reason}")]
    IllegalArgument { parameter: String, reason: String },

    // ===== Integrity Errors =====
    /// A committed model state would break a tree invariant
    #[error("Invariant violation in {model}: {reason}")]
    InvariantViolation { model: String, reason: String },

    // ===== Integration Errors =====
    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl StoreError {
    /// True for errors caused by a structurally invalid request
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidId { .. }
                | StoreError::InvalidAddress { .. }
                | StoreError::AddressTypeMismatch { .. }
                | StoreError::ForeignRepository { .. }
                | StoreError::MalformedCommand { .. }
                | StoreError::CommandOutsideTarget { .. }
                | StoreError::TransactionTooLarge { .. }
        )
    }
}

impl From<StoreError> for ExError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::InvalidId { .. } => {
                ExError::new(ExErrorKind::InvalidId).with_message(message)
            }
            StoreError::InvalidAddress { input, .. } => ExError::new(ExErrorKind::InvalidAddress)
                .with_address(input)
                .with_message(message),
            StoreError::AddressTypeMismatch { address, .. }
            | StoreError::ForeignRepository { address, .. }
            | StoreError::MalformedCommand { address, .. }
            | StoreError::CommandOutsideTarget { address, .. } => {
                ExError::new(ExErrorKind::RequestError)
                    .with_address(address)
                    .with_message(message)
            }
            StoreError::TransactionTooLarge { target, .. } => {
                ExError::new(ExErrorKind::TransactionTooLarge)
                    .with_address(target)
                    .with_message(message)
            }
            StoreError::IllegalArgument { .. } => {
                ExError::new(ExErrorKind::IllegalArgument).with_message(message)
            }
            StoreError::InvariantViolation { model, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_address(model)
                    .with_message(message)
            }
            StoreError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            StoreError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to StoreError
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::RequestError, "ERR_REQUEST"),
            (ExErrorKind::IllegalArgument, "ERR_ILLEGAL_ARGUMENT"),
            (ExErrorKind::InvalidAddress, "ERR_INVALID_ADDRESS"),
            (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, code) in cases {
            assert_eq!(kind.code(), code, "{:?}", kind);
        }
    }

    #[test]
    fn test_request_errors_map_to_request_kind() {
        let err = StoreError::AddressTypeMismatch {
            address: "/repo/m1/o1/f1".to_string(),
            expected: "model".to_string(),
            actual: "field".to_string(),
        };
        assert!(err.is_request_error());

        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::RequestError);
        assert_eq!(ex.address(), Some("/repo/m1/o1/f1"));
    }

    #[test]
    fn test_illegal_argument_is_not_request_error() {
        let err = StoreError::IllegalArgument {
            parameter: "value".to_string(),
            reason: "missing".to_string(),
        };
        assert!(!err.is_request_error());
        assert_eq!(ExError::from(err).code(), "ERR_ILLEGAL_ARGUMENT");
    }

    #[test]
    fn test_ex_error_display_carries_context() {
        let request = RequestContext::new();
        let err = ExError::new(ExErrorKind::RequestError)
            .with_op("get_model_snapshot")
            .with_address("/repo/m1/o1")
            .with_message("wrong level")
            .with_request(request);
        assert_eq!(
            err.to_string(),
            format!(
                "ERR_REQUEST during get_model_snapshot at /repo/m1/o1: wrong level [request {}]",
                request.request_id
            )
        );
        assert_eq!(err.request().map(|r| r.request_id), Some(request.request_id));
    }
}
