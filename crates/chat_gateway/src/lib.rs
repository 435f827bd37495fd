//! Chat gateway: outbound calls to the chat backend and their execution.
mod client;
mod engine;
mod error;
mod types;
mod wire;

pub use client::{
    Gateway, GatewaySettings, ReqwestGateway, DEFAULT_BASE_URL, LOAD_FAILED_MESSAGE,
    WAKING_UP_REPLY,
};
pub use engine::EngineHandle;
pub use error::GatewayError;
pub use types::{EngineEvent, FailureKind, GatewayResult, RequestId};
