#![allow(clippy::unwrap_used, clippy::expect_used)]

use revstore_core::{Address, AtomicCommand, Command, CommandOutcome, Id, Intent};
use revstore_engine::{Engine, EngineConfig, GetRequest};

#[allow(dead_code)]
pub fn id(text: &str) -> Id {
    Id::new(text).unwrap()
}

#[allow(dead_code)]
pub fn addr(text: &str) -> Address {
    text.parse().unwrap()
}

#[allow(dead_code)]
pub fn actor() -> Id {
    id("tester")
}

/// Engine serving the default repository `repo`
#[allow(dead_code)]
pub fn engine() -> Engine {
    Engine::new(&EngineConfig::default()).unwrap()
}

#[allow(dead_code)]
pub fn run(engine: &Engine, cmd: impl Into<Command>) -> CommandOutcome {
    engine.execute_command(&actor(), &cmd.into()).unwrap()
}

/// Engine with `model` created at revision 0
#[allow(dead_code)]
pub fn engine_with_model(model: &str) -> Engine {
    let engine = engine();
    let outcome = run(
        &engine,
        AtomicCommand::add_model(addr(&format!("/repo/{}", model)), Intent::SafeStateBound),
    );
    assert_eq!(outcome, CommandOutcome::Revision(0));
    engine
}

#[allow(dead_code)]
pub fn revision_of(engine: &Engine, model: &str) -> i64 {
    engine
        .get_model_revision(&GetRequest::new(addr(&format!("/repo/{}", model))))
        .unwrap()
        .revision()
}
