use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::error::ClientError;
use super::transport::Transport;
use crate::model::{SubmissionPayload, SwarmState};
use crate::store::{SwarmAction, SwarmStore};

/// Endpoint that starts a swarm, relative to the backend base URL.
pub const SWARM_ENDPOINT: &str = "swarm";

/// Backend reply to a start request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwarmResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Host the backend will target, when it reports one.
    #[serde(default)]
    pub host: Option<String>,
}

/// Submits start requests and records the optimistic state change.
#[derive(Debug)]
pub struct SubmissionCoordinator<T> {
    transport: Arc<T>,
}

impl<T> Clone for SubmissionCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + 'static> SubmissionCoordinator<T> {
    /// Creates a coordinator that sends through `transport`.
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Starts a swarm with `payload`.
    ///
    /// `store` moves to [`SwarmState::Starting`] before this returns, ahead of
    /// any network traffic. The returned future performs a single POST and
    /// yields the backend's reply. Nothing here reverts the state change if
    /// the request fails.
    pub fn start_swarm(
        &self,
        store: &mut dyn SwarmStore,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<SwarmResponse, ClientError>> + Send + use<T> {
        store.dispatch(SwarmAction::SetState(SwarmState::Starting));
        info!(fields = payload.len(), "starting swarm");

        let transport = Arc::clone(&self.transport);
        async move {
            let body = payload.to_form_body()?;
            let text = transport.post_form(SWARM_ENDPOINT, body).await?;
            let reply: SwarmResponse = serde_json::from_str(&text)?;
            Ok::<_, ClientError>(reply)
        }
    }
}
