//! Shared swarm state: typed reads and a single dispatch path for writes.

use tracing::debug;

use crate::model::{SwarmConfiguration, SwarmState};

/// A state change applied through [`SwarmStore::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum SwarmAction {
    /// Move the swarm to the given state.
    SetState(SwarmState),
    /// The backend accepted a start request.
    ///
    /// The backend may echo back the host it resolved.
    Started { host: Option<String> },
}

/// Read/dispatch boundary around the shared [`SwarmConfiguration`].
pub trait SwarmStore {
    /// Current swarm configuration.
    fn swarm(&self) -> &SwarmConfiguration;

    /// Applies `action` to the shared state.
    fn dispatch(&mut self, action: SwarmAction);
}

/// In-memory store backed by [`reduce`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    swarm: SwarmConfiguration,
}

impl Store {
    /// Creates a store holding `swarm`.
    pub fn new(swarm: SwarmConfiguration) -> Self {
        Self { swarm }
    }
}

impl SwarmStore for Store {
    fn swarm(&self) -> &SwarmConfiguration {
        &self.swarm
    }

    fn dispatch(&mut self, action: SwarmAction) {
        debug!(?action, from = %self.swarm.state, "dispatch");
        reduce(&mut self.swarm, action);
    }
}

/// Applies `action` to `swarm`.
pub fn reduce(swarm: &mut SwarmConfiguration, action: SwarmAction) {
    match action {
        SwarmAction::SetState(state) => swarm.state = state,
        SwarmAction::Started { host } => {
            swarm.state = SwarmState::Running;
            if let Some(host) = host {
                swarm.host = host;
            }
        }
    }
}
