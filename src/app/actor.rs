//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{AppEvent, NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    ///
    /// Events from both channels are applied one at a time, to completion,
    /// in the order `select!` yields them.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            let event = tokio::select! {
                Some(event) = ui_rx.recv() => AppEvent::Ui(event),
                Some(response) = net_rx.recv() => AppEvent::Network(response),
                else => break,
            };

            if let Some(cmd) = self.state.update(event) {
                let _ = self.network_tx.send(cmd);
            }
            let _ = self.render_tx.send(self.state.to_render_state());

            if self.state.is_quitting() {
                let _ = self.network_tx.send(NetworkCommand::Shutdown);
                break;
            }
        }
    }
}
