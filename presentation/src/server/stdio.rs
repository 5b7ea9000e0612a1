//! Newline-delimited JSON-RPC tool server
//!
//! Each line on the input stream is one request, notification or batch.
//! Responses are written one per line. Tool executions run on the blocking
//! pool because wrapped library methods may perform blocking I/O.

use super::protocol::{
    PROTOCOL_VERSION, RpcError, SERVER_NAME, ToolCall, error_response, success_response,
};
use bridge_application::{CatalogHandle, ExecuteMethodUseCase, ToolSchemaPort};
use serde_json::{Value, json};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub struct ToolServer {
    catalog: Arc<CatalogHandle>,
    executor: Arc<ExecuteMethodUseCase>,
    schema: Arc<dyn ToolSchemaPort>,
}

impl ToolServer {
    pub fn new(
        catalog: Arc<CatalogHandle>,
        executor: Arc<ExecuteMethodUseCase>,
        schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            catalog,
            executor,
            schema,
        }
    }

    /// Serve on the process stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> io::Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        info!(tools = self.catalog.snapshot().len(), "Tool server listening on stdio");
        self.serve(reader, writer).await
    }

    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    warn!(error = %e, "Input line is not valid UTF-8");
                    Some(error_response(
                        Value::Null,
                        RpcError::parse_error(format!("Parse error: {}", e)),
                    ))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let mut encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }

        info!("Input closed, tool server stopping");
        Ok(())
    }

    /// Handle one input line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let incoming: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Malformed JSON-RPC input");
                return Some(error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        match incoming {
            Value::Array(batch) if batch.is_empty() => Some(error_response(
                Value::Null,
                RpcError::invalid_request("Batch request must not be empty"),
            )),
            Value::Array(batch) => {
                let mut responses = Vec::new();
                for item in batch {
                    if let Some(response) = self.handle_message(item).await {
                        responses.push(response);
                    }
                }
                (!responses.is_empty()).then_some(Value::Array(responses))
            }
            single => self.handle_message(single).await,
        }
    }

    async fn handle_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        let id = obj.get("id").cloned();
        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Some(error_response(
                id.unwrap_or(Value::Null),
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // a response from the client; this server never sends requests
            return None;
        };

        let Some(id) = id else {
            debug!(method, "Ignoring notification");
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        Some(match self.handle_request(method, params).await {
            Ok(result) => success_response(id, result),
            Err(err) => {
                debug!(method, code = err.code, message = %err.message, "Request failed");
                error_response(id, err)
            }
        })
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(Self::initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(&params).await,
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload() -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    fn tools_list_payload(&self) -> Value {
        let catalog = self.catalog.snapshot();
        json!({ "tools": self.schema.catalog_schema(&catalog) })
    }

    async fn handle_tools_call(&self, params: &Value) -> Result<Value, RpcError> {
        let ToolCall { name, arguments } = ToolCall::from_params(params)?;

        let spec = self
            .catalog
            .snapshot()
            .get(&name)
            .cloned()
            .ok_or_else(|| RpcError::invalid_params(format!("Unknown tool: {}", name)))?;

        let executor = Arc::clone(&self.executor);
        let outcome = tokio::task::spawn_blocking(move || executor.execute(&spec, &arguments))
            .await
            .map_err(|e| RpcError::internal(format!("Tool execution aborted: {}", e)))?;

        let structured = outcome.to_json();
        let text = serde_json::to_string(&structured).map_err(|e| RpcError::internal(e.to_string()))?;

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "structuredContent": structured,
            "isError": outcome.is_error(),
        }))
    }
}
