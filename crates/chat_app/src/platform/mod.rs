//! Terminal front-end: wires stdin, the gateway engine and the renderer to the core.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::io;

use chat_core::Msg;
use chat_gateway::GatewayError;
use thiserror::Error;

pub use app::run_app;

/// Events delivered to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppEvent {
    Msg(Msg),
    Quit,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),
    #[error("terminal i/o: {0}")]
    Io(#[from] io::Error),
}
