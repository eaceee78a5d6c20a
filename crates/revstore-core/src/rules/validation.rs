//! Command classification and structural validation
//!
//! Validation is purely structural and independent of tree state: it rejects
//! requests that can never be meaningful (wrong address level, payload on a
//! command that takes none, transaction commands outside the target). Whether
//! a well-formed command succeeds is decided later by the executor.

use crate::address::{Address, AddressedType};
use crate::commands::{AtomicCommand, ChangeType, Command, Level, Transaction};
use crate::errors::{Result, StoreError};
use crate::id::Id;

/// Structural limits applied during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_transaction_commands: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_transaction_commands: 1024,
        }
    }
}

/// Summary of what a command does, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub change_type: ChangeType,
    pub level: Level,
    pub intent: &'static str,
    pub command_count: usize,
}

/// Classify a command
///
/// A transaction classifies as `ChangeType::Transaction` at the level of its
/// target; its intent is the shared intent of its commands, or `mixed`.
pub fn classify(cmd: &Command) -> Classification {
    match cmd {
        Command::Atomic(atomic) => Classification {
            change_type: atomic.change_type,
            level: atomic.level,
            intent: atomic.intent.kind_name(),
            command_count: 1,
        },
        Command::Transaction(txn) => {
            let level = match txn.target.addressed_type() {
                AddressedType::Object => Level::Object,
                _ => Level::Model,
            };
            let mut intents = txn.commands.iter().map(|c| c.intent.kind_name());
            let first = intents.next();
            let intent = match first {
                Some(name) if intents.all(|other| other == name) => name,
                Some(_) => "mixed",
                None => "none",
            };
            Classification {
                change_type: ChangeType::Transaction,
                level,
                intent,
                command_count: txn.commands.len(),
            }
        }
    }
}

/// Validate any command against the repository it is submitted to
///
/// # Errors
/// * `ForeignRepository` - address belongs to another repository
/// * `AddressTypeMismatch` - address level does not match the command level
/// * `MalformedCommand` - illegal change type / payload combination
/// * `CommandOutsideTarget` - transaction command not strictly below the target
/// * `TransactionTooLarge` - more commands than `limits` allow
/// * `IllegalArgument` - missing value payload or empty transaction
pub fn validate_command(repository: &Id, cmd: &Command, limits: &Limits) -> Result<()> {
    match cmd {
        Command::Atomic(atomic) => validate_atomic(repository, atomic),
        Command::Transaction(txn) => validate_transaction(repository, txn, limits),
    }
}

pub fn validate_atomic(repository: &Id, cmd: &AtomicCommand) -> Result<()> {
    require_repository(repository, &cmd.address)?;

    let expected = match cmd.level {
        Level::Model => AddressedType::Model,
        Level::Object => AddressedType::Object,
        Level::Field | Level::Value => AddressedType::Field,
    };
    require_addressed_type(&cmd.address, &[expected])?;

    let malformed = |reason: &str| StoreError::MalformedCommand {
        address: cmd.address.to_string(),
        reason: reason.to_string(),
    };

    match (cmd.level, cmd.change_type) {
        (_, ChangeType::Transaction) => {
            return Err(malformed("an atomic command cannot be a transaction"))
        }
        (Level::Value, ChangeType::Add | ChangeType::Change) => {
            if cmd.value.is_none() {
                return Err(StoreError::IllegalArgument {
                    parameter: "value".to_string(),
                    reason: format!("{} value on {} requires a value", cmd.change_type, cmd.address),
                });
            }
        }
        (level, ChangeType::Change) if level != Level::Value => {
            return Err(malformed("only values can be changed"));
        }
        _ => {
            if cmd.value.is_some() {
                return Err(malformed("command does not take a value"));
            }
        }
    }
    Ok(())
}

pub fn validate_transaction(repository: &Id, txn: &Transaction, limits: &Limits) -> Result<()> {
    require_repository(repository, &txn.target)?;
    require_addressed_type(&txn.target, &[AddressedType::Model, AddressedType::Object])?;

    if txn.commands.is_empty() {
        return Err(StoreError::IllegalArgument {
            parameter: "commands".to_string(),
            reason: "a transaction must contain at least one command".to_string(),
        });
    }
    if txn.commands.len() > limits.max_transaction_commands {
        return Err(StoreError::TransactionTooLarge {
            target: txn.target.to_string(),
            count: txn.commands.len(),
            limit: limits.max_transaction_commands,
        });
    }

    for cmd in &txn.commands {
        validate_atomic(repository, cmd)?;
        if !txn.target.is_ancestor_of(&cmd.address) {
            return Err(StoreError::CommandOutsideTarget {
                address: cmd.address.to_string(),
                target: txn.target.to_string(),
            });
        }
    }
    Ok(())
}

/// Require `address` to belong to `repository`
pub fn require_repository(repository: &Id, address: &Address) -> Result<()> {
    if address.repository_id() != repository {
        return Err(StoreError::ForeignRepository {
            address: address.to_string(),
            repository: repository.to_string(),
        });
    }
    Ok(())
}

/// Require `address` to have one of the `allowed` addressed types
pub fn require_addressed_type(address: &Address, allowed: &[AddressedType]) -> Result<()> {
    let actual = address.addressed_type();
    if allowed.contains(&actual) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(StoreError::AddressTypeMismatch {
        address: address.to_string(),
        expected,
        actual: actual.to_string(),
    })
}
