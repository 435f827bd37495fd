use std::fmt;

pub type RequestId = u64;

/// Uniform outcome of every gateway call.
///
/// Transport and server failures arrive as `Failed`, already carrying a
/// user-facing message; callers never see a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResult {
    Reply { reply: String },
    Loaded { message: String },
    Status { status: String, chunks_loaded: u64 },
    Failed { kind: FailureKind, message: String },
}

impl GatewayResult {
    /// Text to show the user, whatever the outcome.
    pub fn text(&self) -> String {
        match self {
            GatewayResult::Reply { reply } => reply.clone(),
            GatewayResult::Loaded { message } | GatewayResult::Failed { message, .. } => {
                message.clone()
            }
            GatewayResult::Status {
                status,
                chunks_loaded,
            } => format!("Backend {status}: {chunks_loaded} chunks loaded"),
        }
    }

    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            GatewayResult::Failed { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ChatCompleted {
        request_id: RequestId,
        result: GatewayResult,
    },
    LoadCompleted {
        result: GatewayResult,
    },
    HealthChecked {
        result: GatewayResult,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    InvalidEndpoint,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unreachable => write!(f, "unreachable"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
        }
    }
}
