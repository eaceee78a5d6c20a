//! Command types
//!
//! A command is a tagged union of change type, level, intent and payload. The
//! executor matches on `(level, change_type)` exhaustively; there is one
//! command shape for every level rather than a type per combination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::value::Value;

/// Kind of change requested by a command or reported by an event
///
/// `Transaction` only appears on events; an atomic command carrying it is
/// rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Add,
    Remove,
    Change,
    Transaction,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Add => "add",
            ChangeType::Remove => "remove",
            ChangeType::Change => "change",
            ChangeType::Transaction => "transaction",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tree level a command operates on
///
/// `Field` adds or removes the field entity; `Value` sets, changes or clears
/// the value it holds. Both address the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Model,
    Object,
    Field,
    Value,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Model => "model",
            Level::Object => "object",
            Level::Field => "field",
            Level::Value => "value",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected state of the target for a revision-bound command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionPrecondition {
    /// The target must not exist yet
    NotExisting,
    /// The target's current revision must equal this value
    Exactly(u64),
}

/// How strictly a command's preconditions are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Ignore preconditions; no-op when the postcondition already holds
    Forced,
    /// Check only existence of the target (and of its value)
    SafeStateBound,
    /// Check an explicit revision precondition
    SafeRevisionBound(RevisionPrecondition),
}

impl Intent {
    pub fn is_forced(&self) -> bool {
        matches!(self, Intent::Forced)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Intent::Forced => "forced",
            Intent::SafeStateBound => "safe_state_bound",
            Intent::SafeRevisionBound(_) => "safe_revision_bound",
        }
    }
}

/// A single-entity mutation
///
/// `address` is the address of the entity being added, removed or changed;
/// for `Level::Value` it is the address of the field holding the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicCommand {
    pub change_type: ChangeType,
    pub level: Level,
    pub address: Address,
    pub intent: Intent,
    pub value: Option<Value>,
}

impl AtomicCommand {
    pub fn new(
        change_type: ChangeType,
        level: Level,
        address: Address,
        intent: Intent,
        value: Option<Value>,
    ) -> Self {
        Self {
            change_type,
            level,
            address,
            intent,
            value,
        }
    }

    pub fn add_model(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Add, Level::Model, address, intent, None)
    }

    pub fn remove_model(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Remove, Level::Model, address, intent, None)
    }

    pub fn add_object(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Add, Level::Object, address, intent, None)
    }

    pub fn remove_object(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Remove, Level::Object, address, intent, None)
    }

    pub fn add_field(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Add, Level::Field, address, intent, None)
    }

    pub fn remove_field(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Remove, Level::Field, address, intent, None)
    }

    pub fn add_value(address: Address, intent: Intent, value: impl Into<Value>) -> Self {
        Self::new(
            ChangeType::Add,
            Level::Value,
            address,
            intent,
            Some(value.into()),
        )
    }

    pub fn change_value(address: Address, intent: Intent, value: impl Into<Value>) -> Self {
        Self::new(
            ChangeType::Change,
            Level::Value,
            address,
            intent,
            Some(value.into()),
        )
    }

    pub fn remove_value(address: Address, intent: Intent) -> Self {
        Self::new(ChangeType::Remove, Level::Value, address, intent, None)
    }
}

/// An ordered list of commands applied atomically to one model or object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Model or object address every command must lie strictly below
    pub target: Address,
    pub commands: Vec<AtomicCommand>,
}

impl Transaction {
    pub fn new(target: Address, commands: Vec<AtomicCommand>) -> Self {
        Self { target, commands }
    }
}

/// Anything the engine can execute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Atomic(AtomicCommand),
    Transaction(Transaction),
}

impl Command {
    /// Address the command is aimed at: the entity, or the transaction target
    pub fn address(&self) -> &Address {
        match self {
            Command::Atomic(cmd) => &cmd.address,
            Command::Transaction(txn) => &txn.target,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Command::Transaction(_))
    }
}

impl From<AtomicCommand> for Command {
    fn from(cmd: AtomicCommand) -> Self {
        Command::Atomic(cmd)
    }
}

impl From<Transaction> for Command {
    fn from(txn: Transaction) -> Self {
        Command::Transaction(txn)
    }
}
