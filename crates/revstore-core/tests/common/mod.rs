#![allow(clippy::unwrap_used, clippy::expect_used)]

use revstore_core::{
    apply, Address, Command, CommandOutcome, EventLog, ExecutionContext, Id, Limits, ModelState,
    Result,
};

#[allow(dead_code)]
pub fn id(text: &str) -> Id {
    Id::new(text).unwrap()
}

#[allow(dead_code)]
pub fn addr(text: &str) -> Address {
    text.parse().unwrap()
}

/// One model plus its event log, publishing committed results the way the
/// engine does
#[allow(dead_code)]
pub struct ModelHarness {
    pub repository: Id,
    pub state: ModelState,
    pub log: EventLog,
    pub ctx: ExecutionContext,
    pub limits: Limits,
}

#[allow(dead_code)]
impl ModelHarness {
    pub fn new(model: &str) -> Self {
        let repository = id("repo");
        let address = Address::model(repository.clone(), id(model));
        Self {
            repository,
            state: ModelState::never_existed(address),
            log: EventLog::new(),
            ctx: ExecutionContext::new(id("tester")),
            limits: Limits::default(),
        }
    }

    /// Model created at revision 0
    pub fn created(model: &str) -> Self {
        let mut harness = Self::new(model);
        let address = harness.state.address().clone();
        let outcome = harness.run(revstore_core::AtomicCommand::add_model(
            address,
            revstore_core::Intent::SafeStateBound,
        ));
        assert_eq!(outcome, CommandOutcome::Revision(0));
        harness
    }

    pub fn model_address(&self) -> Address {
        self.state.address().clone()
    }

    pub fn try_run(&mut self, cmd: impl Into<Command>) -> Result<CommandOutcome> {
        let cmd = cmd.into();
        let execution = apply(&self.state, &self.ctx, &cmd, &self.repository, &self.limits)?;
        if let (Some(state), Some(event)) = (execution.state, execution.event) {
            self.log.append(event)?;
            self.state = state;
        }
        Ok(execution.outcome)
    }

    pub fn run(&mut self, cmd: impl Into<Command>) -> CommandOutcome {
        self.try_run(cmd).unwrap()
    }
}
