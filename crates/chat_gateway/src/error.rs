use std::io;

use thiserror::Error;

use crate::FailureKind;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("could not start gateway runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("connection failed: {0}")]
    Unreachable(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("http status {status}")]
    HttpStatus { status: u16, detail: Option<String> },
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::InvalidBaseUrl { .. } => FailureKind::InvalidEndpoint,
            GatewayError::Client(_) | GatewayError::Runtime(_) | GatewayError::Unreachable(_) => {
                FailureKind::Unreachable
            }
            GatewayError::Timeout(_) => FailureKind::Timeout,
            GatewayError::HttpStatus { status, .. } => FailureKind::HttpStatus(*status),
            GatewayError::TooLarge { max_bytes, actual } => FailureKind::TooLarge {
                max_bytes: *max_bytes,
                actual: *actual,
            },
            GatewayError::Malformed(_) => FailureKind::MalformedResponse,
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return GatewayError::Malformed(err.to_string());
    }
    GatewayError::Unreachable(err.to_string())
}
