//! Line-delimited JSON-RPC 2.0 transport for the tools, for agents that spawn the
//! binary and talk to it over stdin/stdout.
//!
//! Supported methods: `initialize`, `ping`, `tools/list` and `tools/call`.
//! Notifications (requests without an `id`) are accepted and never answered.

use crate::{
    error::AppError,
    tools::{self, Tool},
    AppState,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default = "empty_arguments")]
    arguments: Value,
}

fn empty_arguments() -> Value {
    json!({})
}

/// Handles one message. Returns `None` for notifications.
pub async fn handle_message(state: &AppState, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable JSON-RPC message.");
            return Some(JsonRpcResponse::failure(
                Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    let id = request.id?;
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::failure(
            id,
            error_codes::INVALID_REQUEST,
            "Invalid request: jsonrpc must be \"2.0\"",
        ));
    }

    tracing::debug!(method = %request.method, "JSON-RPC request.");
    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "socials", "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            let descriptors: Vec<_> = Tool::ALL.iter().map(Tool::descriptor).collect();
            match serde_json::to_value(descriptors) {
                Ok(tools) => JsonRpcResponse::success(id, json!({ "tools": tools })),
                Err(e) => JsonRpcResponse::failure(id, error_codes::INTERNAL_ERROR, e.to_string()),
            }
        }
        "tools/call" => call_tool(state, id, request.params).await,
        other => JsonRpcResponse::failure(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        ),
    };
    Some(response)
}

async fn call_tool(state: &AppState, id: Value, params: Value) -> JsonRpcResponse {
    let params: CallParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::failure(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };
    let Some(tool) = Tool::from_name(&params.name) else {
        return JsonRpcResponse::failure(
            id,
            error_codes::INVALID_PARAMS,
            AppError::UnknownTool(params.name).to_string(),
        );
    };

    let outcome = tools::invoke(state.client.as_ref(), &state.engine, tool, params.arguments)
        .await
        .and_then(|result| serde_json::to_value(result).map_err(AppError::from));
    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e @ (AppError::InvalidInput(_) | AppError::Validation(_))) => {
            JsonRpcResponse::failure(id, error_codes::INVALID_PARAMS, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Tool call failed.");
            JsonRpcResponse::failure(id, error_codes::INTERNAL_ERROR, e.to_string())
        }
    }
}

/// Answers every line of `reader` on `writer` until end of input.
pub async fn serve_lines<R, W>(state: &AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = handle_message(state, &line).await {
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }
    }
    Ok(())
}
