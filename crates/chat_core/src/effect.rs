use std::time::Duration;

use crate::{MessageId, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend; the reply is routed back to `placeholder`.
    SendChat { placeholder: MessageId, text: String },
    /// Fire `Msg::CooldownElapsed { timer }` after `delay`.
    ArmCooldown { timer: TimerId, delay: Duration },
    TriggerLoad,
    CheckStatus,
    /// Blocking acknowledgment; the front-end answers with `Msg::NoticeAcknowledged`.
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SendThrottled,
    LoadResult,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn send_throttled() -> Self {
        Self {
            kind: NoticeKind::SendThrottled,
            text: "Please wait 2 seconds for the next query".to_string(),
        }
    }

    pub fn load_result(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::LoadResult,
            text: message.into(),
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Status,
            text: message.into(),
        }
    }
}
