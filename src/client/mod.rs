//! Backend client: HTTP transport and the start-request coordinator.

mod coordinator;
mod error;
mod transport;

pub use coordinator::{SWARM_ENDPOINT, SubmissionCoordinator, SwarmResponse};
pub use error::ClientError;
pub use transport::{FORM_CONTENT_TYPE, HttpTransport, Transport};
