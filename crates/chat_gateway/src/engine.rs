use std::sync::{mpsc, Arc};
use std::thread;

use chat_logging::chat_debug;

use crate::client::{Gateway, GatewaySettings, ReqwestGateway};
use crate::{EngineEvent, GatewayError, RequestId};

enum EngineCommand {
    SendChat { request_id: RequestId, text: String },
    TriggerLoad,
    CheckHealth,
}

/// Runs gateway calls on a background tokio runtime.
///
/// Commands are fire-and-forget; each one yields exactly one `EngineEvent`.
/// There is no cancellation: a request runs to completion or failure.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let gateway = ReqwestGateway::new(settings)?;
        Self::with_gateway(Arc::new(gateway))
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Result<Self, GatewayError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, event_tx).await;
                });
            }
            chat_debug!("gateway engine shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send_chat(&self, request_id: RequestId, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SendChat {
            request_id,
            text: text.into(),
        });
    }

    pub fn trigger_load(&self) {
        let _ = self.cmd_tx.send(EngineCommand::TriggerLoad);
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    gateway: &dyn Gateway,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::SendChat { request_id, text } => EngineEvent::ChatCompleted {
            request_id,
            result: gateway.send_chat(&text).await,
        },
        EngineCommand::TriggerLoad => EngineEvent::LoadCompleted {
            result: gateway.trigger_load().await,
        },
        EngineCommand::CheckHealth => EngineEvent::HealthChecked {
            result: gateway.check_health().await,
        },
    };
    let _ = event_tx.send(event);
}
