//! Action registry.
//!
//! A concrete handler type per operation, each implementing [`Actionable`],
//! registered in a name→handler map built once at process start. Dispatch is
//! a map lookup followed by payload deserialization; unknown names and
//! malformed payloads fail before any storage effect.

use migra_core::Name;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::actions::{Eject, IdxC, IdxDbl, IdxI, IdxIi, IdxLdbl, Inject};
use crate::{Error, MigrationFacade, Output, Result};

pub const ACTION_INJECT: Name = Name::parse_const("inject");
pub const ACTION_IDXI: Name = Name::parse_const("idxi");
pub const ACTION_IDXII: Name = Name::parse_const("idxii");
pub const ACTION_IDXC: Name = Name::parse_const("idxc");
pub const ACTION_IDXDBL: Name = Name::parse_const("idxdbl");
pub const ACTION_IDXLDBL: Name = Name::parse_const("idxldbl");
pub const ACTION_EJECT: Name = Name::parse_const("eject");

/// Capability of handling one named action against the facade.
pub trait Actionable: Send + Sync {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output>;
}

fn decode<T: DeserializeOwned>(args: &Value) -> Result<T> {
    serde_json::from_value(args.clone()).map_err(|err| Error::BadArguments {
        reason: err.to_string(),
    })
}

struct InjectAction;

impl Actionable for InjectAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: Inject = decode(args)?;
        let locator = facade.inject(a.table, a.scope, a.payer, a.id, &a.data)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct IdxIAction;

impl Actionable for IdxIAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: IdxI = decode(args)?;
        let locator = facade.idxi(a.table, a.scope, a.payer, a.id, a.secondary)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct IdxIiAction;

impl Actionable for IdxIiAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: IdxIi = decode(args)?;
        let locator = facade.idxii(a.table, a.scope, a.payer, a.id, a.secondary)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct IdxCAction;

impl Actionable for IdxCAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: IdxC = decode(args)?;
        let locator = facade.idxc(a.table, a.scope, a.payer, a.id, a.secondary)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct IdxDblAction;

impl Actionable for IdxDblAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: IdxDbl = decode(args)?;
        let locator = facade.idxdbl(a.table, a.scope, a.payer, a.id, a.secondary)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct IdxLdblAction;

impl Actionable for IdxLdblAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: IdxLdbl = decode(args)?;
        let locator = facade.idxldbl(a.table, a.scope, a.payer, a.id, a.secondary)?;
        Ok(Output::Locator(locator.slot()))
    }
}

struct EjectAction;

impl Actionable for EjectAction {
    fn apply(&self, facade: &MigrationFacade, args: &Value) -> Result<Output> {
        let a: Eject = decode(args)?;
        facade.eject(a.account, a.table, a.scope, a.id)?;
        Ok(Output::Unit)
    }
}

/// Name→handler map over the seven operations.
pub struct ActionRegistry {
    handlers: FxHashMap<Name, Box<dyn Actionable>>,
}

impl ActionRegistry {
    /// Build the full registry. Called once at process start; see
    /// [`registry`] for the shared instance.
    pub fn new() -> Self {
        let mut handlers: FxHashMap<Name, Box<dyn Actionable>> = FxHashMap::default();
        handlers.insert(ACTION_INJECT, Box::new(InjectAction));
        handlers.insert(ACTION_IDXI, Box::new(IdxIAction));
        handlers.insert(ACTION_IDXII, Box::new(IdxIiAction));
        handlers.insert(ACTION_IDXC, Box::new(IdxCAction));
        handlers.insert(ACTION_IDXDBL, Box::new(IdxDblAction));
        handlers.insert(ACTION_IDXLDBL, Box::new(IdxLdblAction));
        handlers.insert(ACTION_EJECT, Box::new(EjectAction));
        Self { handlers }
    }

    /// Route one inbound call to its handler.
    pub fn dispatch(&self, facade: &MigrationFacade, action: Name, args: &Value) -> Result<Output> {
        let handler = self
            .handlers
            .get(&action)
            .ok_or(Error::UnknownAction { action })?;
        handler.apply(facade, args)
    }

    /// Registered action names, mostly useful for diagnostics.
    pub fn action_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.handlers.keys().copied()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<ActionRegistry> = Lazy::new(ActionRegistry::new);

/// The process-wide registry, built on first use.
pub fn registry() -> &'static ActionRegistry {
    &REGISTRY
}
