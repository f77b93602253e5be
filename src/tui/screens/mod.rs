//! TUI screen implementations.

pub mod help;
pub mod swarm_form;

pub use help::{HelpState, draw_help};
pub use swarm_form::{SwarmFormState, draw_swarm_form};
