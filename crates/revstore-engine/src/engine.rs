//! The engine: one repository of independently versioned models
//!
//! ## Concurrency
//!
//! Each model has its own slot with a writer gate and a published record.
//! Commands on one model are serialized by the gate; commands on different
//! models run in parallel. The committed state and its event log are swapped
//! under a single write lock, so readers observe either the state before a
//! commit or the state after it, never a mix.
//!
//! A slot is created by the first command that commits on its model. Commands
//! on an unknown model run against a transient never-existed state and leave
//! the registry untouched unless they change something.
//!
//! ## Logging Ownership
//!
//! Every public operation logs `start` and `end` (or `end_error`) through the
//! core macros. The kernel below only emits `tracing::debug!` details.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};

use revstore_core::rules::validation::{require_addressed_type, require_repository};
use revstore_core::rules::{classify, validate_command};
use revstore_core::snapshot::{model_snapshot, object_snapshot};
use revstore_core::{
    apply, log_op_end, log_op_error, log_op_start, Address, AddressedType, Command,
    CommandOutcome, Event, EventLog, ExError, ExecutionContext, Id, Limits, ModelRevision,
    ModelSnapshot, ModelState, ObjectSnapshot, Result, StoreError,
};

use crate::config::EngineConfig;
use crate::requests::GetRequest;

/// Committed state of one model together with its history
struct ModelRecord {
    state: ModelState,
    log: EventLog,
}

struct ModelSlot {
    /// Held for the whole execution of a command on this model
    writer: Mutex<()>,
    record: RwLock<ModelRecord>,
}

impl ModelSlot {
    fn new(record: ModelRecord) -> Self {
        Self {
            writer: Mutex::new(()),
            record: RwLock::new(record),
        }
    }
}

pub struct Engine {
    repository: Id,
    limits: Limits,
    models: RwLock<BTreeMap<Id, Arc<ModelSlot>>>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl Engine {
    /// # Errors
    /// Returns `Config` if the configuration does not validate.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository: config.repository()?,
            limits: config.limits(),
            models: RwLock::new(BTreeMap::new()),
        })
    }

    pub fn repository_id(&self) -> &Id {
        &self.repository
    }

    pub fn repository_address(&self) -> Address {
        Address::repository(self.repository.clone())
    }

    // ===== Commands =====

    /// Execute an atomic command or a transaction on behalf of `actor`
    ///
    /// `Failed` and `NoChange` are returned as outcomes, not errors.
    ///
    /// # Errors
    /// Returns a request error for malformed commands, `IllegalArgument` for
    /// a missing value payload and `InvariantViolation` if the commit would
    /// break a tree invariant.
    pub fn execute_command(&self, actor: &Id, command: &Command) -> Result<CommandOutcome> {
        self.execute_command_in(&ExecutionContext::new(actor.clone()), command)
    }

    /// Like `execute_command`, with caller-supplied request correlation
    ///
    /// # Errors
    /// See [`Engine::execute_command`].
    pub fn execute_command_in(
        &self,
        ctx: &ExecutionContext,
        command: &Command,
    ) -> Result<CommandOutcome> {
        let class = classify(command);
        log_op_start!(
            "execute_command",
            address = %command.address(),
            actor_id = %ctx.actor,
            request_id = %ctx.request.request_id,
            change_type = %class.change_type,
            level = %class.level,
            intent = class.intent,
        );
        let start = Instant::now();

        let outcome = self.execute_command_impl(ctx, command).map_err(|e| {
            log_op_error!(
                "execute_command",
                ExError::from(e.clone())
                    .with_op("execute_command")
                    .with_request(ctx.request),
                duration_ms = elapsed_ms(start),
                address = %command.address()
            );
            e
        })?;

        log_op_end!(
            "execute_command",
            duration_ms = elapsed_ms(start),
            address = %command.address(),
            outcome = outcome.to_wire()
        );
        Ok(outcome)
    }

    fn execute_command_impl(
        &self,
        ctx: &ExecutionContext,
        command: &Command,
    ) -> Result<CommandOutcome> {
        let Some(model) = command.address().model_address() else {
            validate_command(&self.repository, command, &self.limits)?;
            return Err(StoreError::MalformedCommand {
                address: command.address().to_string(),
                reason: "command does not address a model".to_string(),
            });
        };

        loop {
            if let Some(slot) = self.slot(&model) {
                return self.execute_on_slot(&slot, ctx, command);
            }

            let unknown = ModelState::never_existed(model.clone());
            let execution = apply(&unknown, ctx, command, &self.repository, &self.limits)?;
            let (Some(state), Some(event)) = (execution.state, execution.event) else {
                return Ok(execution.outcome);
            };

            let mut models = self.models.write();
            if models.contains_key(model.last_id()) {
                // Another writer created the model first; rerun against it.
                continue;
            }
            let mut log = EventLog::new();
            log.append(event)?;
            models.insert(
                model.last_id().clone(),
                Arc::new(ModelSlot::new(ModelRecord { state, log })),
            );
            return Ok(execution.outcome);
        }
    }

    fn execute_on_slot(
        &self,
        slot: &ModelSlot,
        ctx: &ExecutionContext,
        command: &Command,
    ) -> Result<CommandOutcome> {
        let _gate = slot.writer.lock();
        let execution = {
            let record = slot.record.read();
            apply(&record.state, ctx, command, &self.repository, &self.limits)?
        };

        if let (Some(state), Some(event)) = (execution.state, execution.event) {
            let mut record = slot.record.write();
            record.log.append(event)?;
            record.state = state;
        }
        Ok(execution.outcome)
    }

    // ===== Queries =====

    /// Events visible at `address` with revision in `[begin, end]`
    ///
    /// # Errors
    /// Returns a request error for a foreign or repository-level address.
    pub fn get_events(&self, address: &Address, begin: u64, end: u64) -> Result<Vec<Event>> {
        log_op_start!("get_events", address = %address, begin = begin, end = end);
        let start = Instant::now();

        let events = self.get_events_impl(address, begin, end).map_err(|e| {
            log_op_error!("get_events", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "get_events",
            duration_ms = elapsed_ms(start),
            event_count = events.len() as u64
        );
        Ok(events)
    }

    fn get_events_impl(&self, address: &Address, begin: u64, end: u64) -> Result<Vec<Event>> {
        require_repository(&self.repository, address)?;
        require_addressed_type(
            address,
            &[
                AddressedType::Model,
                AddressedType::Object,
                AddressedType::Field,
            ],
        )?;
        Ok(self
            .slot(address)
            .map(|slot| slot.record.read().log.events(address, begin, end))
            .unwrap_or_default())
    }

    /// Deep copy of a model, `None` if it never existed or was removed
    ///
    /// # Errors
    /// Returns a request error unless the address is a model of this repository.
    pub fn get_model_snapshot(&self, request: &GetRequest) -> Result<Option<ModelSnapshot>> {
        self.read_op("get_model_snapshot", request, AddressedType::Model, |state| {
            model_snapshot(state)
        })
    }

    /// Deep copy of an object, `None` if it does not exist
    ///
    /// # Errors
    /// Returns a request error unless the address is an object of this repository.
    pub fn get_object_snapshot(&self, request: &GetRequest) -> Result<Option<ObjectSnapshot>> {
        self.read_op("get_object_snapshot", request, AddressedType::Object, |state| {
            request
                .address
                .object_id()
                .and_then(|object| object_snapshot(state, object))
        })
    }

    /// Current revision of a model, or `MODEL_DOES_NOT_EXIST_YET`
    ///
    /// # Errors
    /// Returns a request error unless the address is a model of this repository.
    pub fn get_model_revision(&self, request: &GetRequest) -> Result<ModelRevision> {
        self.read_op("get_model_revision", request, AddressedType::Model, |state| {
            Some(state.model_revision())
        })
        .map(|revision| revision.unwrap_or(ModelRevision::MODEL_DOES_NOT_EXIST_YET))
    }

    /// Ids of every model ever created, removed ones included
    pub fn get_managed_model_ids(&self) -> BTreeSet<Id> {
        self.models
            .read()
            .iter()
            .filter(|(_, slot)| slot.record.read().state.ever_existed())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn has_managed_model(&self, model: &Id) -> bool {
        self.models
            .read()
            .get(model)
            .is_some_and(|slot| slot.record.read().state.ever_existed())
    }

    /// Shared shape of the snapshot and revision reads
    fn read_op<T>(
        &self,
        op: &'static str,
        request: &GetRequest,
        expected: AddressedType,
        read: impl FnOnce(&ModelState) -> Option<T>,
    ) -> Result<Option<T>> {
        log_op_start!(
            op,
            address = %request.address,
            include_tentative = request.include_tentative
        );
        let start = Instant::now();

        let check = require_repository(&self.repository, &request.address)
            .and_then(|()| require_addressed_type(&request.address, &[expected]));
        if let Err(e) = check {
            log_op_error!(op, e.clone(), duration_ms = elapsed_ms(start));
            return Err(e);
        }

        let result = self
            .slot(&request.address)
            .and_then(|slot| read(&slot.record.read().state));

        log_op_end!(
            op,
            duration_ms = elapsed_ms(start),
            found = result.is_some()
        );
        Ok(result)
    }

    // ===== Slots =====

    fn slot(&self, address: &Address) -> Option<Arc<ModelSlot>> {
        let model = address.model_id()?;
        self.models.read().get(model).cloned()
    }
}
