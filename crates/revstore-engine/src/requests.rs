use revstore_core::Address;

/// Read request for snapshots and revisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub address: Address,
    /// Accepted for compatibility; commits are synchronous so there is no
    /// tentative state to include
    pub include_tentative: bool,
}

impl GetRequest {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            include_tentative: false,
        }
    }

    pub fn including_tentative(address: Address) -> Self {
        Self {
            address,
            include_tentative: true,
        }
    }
}
