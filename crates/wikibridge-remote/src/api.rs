//! Wire payload types for the remote channels.
//!
//! The RPC channel is a single-endpoint request/response protocol: JSON
//! `{query, variables}` in, `{data}` or `{errors: [{message}]}` out.
//! Mutations additionally carry a `responseResult` envelope.

use serde::{Deserialize, Serialize};
use wikibridge_core::{Error, Result};

/// Request envelope for the RPC channel.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// One remote-reported error.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub message: String,
}

/// Response envelope for the RPC channel.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<RpcError>,
}

impl RpcResponse {
    /// Unwrap the data payload, turning any reported errors into a
    /// remote error carrying the concatenated messages.
    pub fn into_data(self) -> Result<serde_json::Value> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::remote(message));
        }
        self.data
            .ok_or_else(|| Error::remote("response carried neither data nor errors"))
    }
}

/// The per-mutation status envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult {
    pub succeeded: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseResult {
    /// Treat `succeeded == false` as a remote error.
    pub fn check(&self) -> Result<()> {
        if self.succeeded {
            Ok(())
        } else {
            Err(Error::remote(
                self.message.clone().unwrap_or_else(|| "mutation failed".to_string()),
            ))
        }
    }
}

/// Response of the binary upload channel.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub succeeded: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// The remote location on success: `url` preferred, `path` accepted.
    pub fn location(self) -> Result<String> {
        if !self.succeeded {
            return Err(Error::remote(
                self.message.unwrap_or_else(|| "upload rejected".to_string()),
            ));
        }
        self.url
            .or(self.path)
            .ok_or_else(|| Error::remote("upload succeeded but reported no location"))
    }
}
