use crate::{
    error::AppError,
    tools::{self, Tool, ToolDescriptor, ToolResult},
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// # GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// # GET /tools
/// Lists every callable tool with its argument schema.
pub async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(Tool::ALL.iter().map(Tool::descriptor).collect())
}

/// # POST /tools/:name
/// Runs one tool with the JSON body as its arguments.
pub async fn call_tool(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(arguments): Json<Value>,
) -> Result<Json<ToolResult>, AppError> {
    let tool = Tool::from_name(&name).ok_or(AppError::UnknownTool(name))?;
    tracing::info!(tool = tool.name(), "Tool called.");
    let result = tools::invoke(state.client.as_ref(), &state.engine, tool, arguments).await?;
    Ok(Json(result))
}
