//! Network actor - runs HTTP requests in Tokio async runtime

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_request};

/// Network actor that executes request commands off the app loop
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    artificial_delay: Duration,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, config: &Config) -> Self {
        NetworkActor {
            client: create_client(config.request_timeout()),
            response_tx,
            artificial_delay: config.artificial_delay(),
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let delay = self.artificial_delay;

                            // Runs to completion; there is no cancellation
                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %request.url, method = ?request.method, "Executing request");
                                let outcome = execute_request(&client, request, delay).await;
                                tracing::info!(id, success = outcome.is_success(), "Request completed");
                                let _ = response_tx.send(NetworkResponse { id, outcome });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Request task failed");
                    }
                }
            }
        }
    }
}
