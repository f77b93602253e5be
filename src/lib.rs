#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal control surface for starting load-test swarms.
//!
//! [`model::resolve_form`] turns the backend's swarm metadata into form
//! fields; [`client::SubmissionCoordinator`] posts the filled form and
//! records the optimistic state change in the [`store::Store`].

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;
pub mod tui;
