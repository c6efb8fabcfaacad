//! stdio transport
//!
//! Client lines are screened before they reach `rmcp`: a line that is not
//! UTF-8 JSON is answered with a parse error and the session carries on.

use super::McpServer;
use rmcp::ServiceExt;
use rmcp::model::ErrorCode;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Buffer size of the in-process pipe between the screen and `rmcp`
const PIPE_CAPACITY: usize = 64 * 1024;

/// Run the MCP server over the process stdio
pub async fn run_stdio(server: McpServer) -> anyhow::Result<()> {
    info!("MCP server ready, listening on stdio...");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Serve newline-delimited messages from `reader` until EOF
pub async fn serve<R, W>(server: McpServer, mut reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (server_side, client_side) = tokio::io::duplex(PIPE_CAPACITY);
    let (from_server, mut to_server) = tokio::io::split(client_side);
    let (lines_tx, lines_rx) = mpsc::channel::<Vec<u8>>(32);

    let output = tokio::spawn(write_lines(lines_rx, writer));
    let relay = tokio::spawn(relay_lines(BufReader::new(from_server), lines_tx.clone()));
    let session = tokio::spawn(async move {
        match server.serve(server_side).await {
            Ok(running) => {
                running.waiting().await?;
            }
            Err(e) => warn!("Session closed before initialization: {}", e),
        }
        anyhow::Ok(())
    });

    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let message = line.trim_ascii();
        if message.is_empty() {
            continue;
        }

        match screen(message) {
            None => {
                to_server.write_all(message).await?;
                to_server.write_all(b"\n").await?;
            }
            Some(code) => {
                warn!("Rejecting message ({} bytes): {:?}", message.len(), code);
                if lines_tx.send(error_line(code)).await.is_err() {
                    break;
                }
            }
        }
    }

    to_server.shutdown().await?;
    drop(lines_tx);

    session.await??;
    relay.await??;
    output.await??;
    Ok(())
}

/// Error to answer instead of forwarding `message`, if any
fn screen(message: &[u8]) -> Option<ErrorCode> {
    let Ok(text) = std::str::from_utf8(message) else {
        return Some(ErrorCode::PARSE_ERROR);
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(_)) => None,
        Ok(_) => Some(ErrorCode::INVALID_REQUEST),
        Err(_) => Some(ErrorCode::PARSE_ERROR),
    }
}

fn error_line(code: ErrorCode) -> Vec<u8> {
    let message = if code == ErrorCode::PARSE_ERROR {
        "Parse error"
    } else {
        "Invalid Request"
    };
    json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {"code": code.0, "message": message}
    })
    .to_string()
    .into_bytes()
}

/// Forward every line `rmcp` writes to the output queue
async fn relay_lines<R>(mut reader: R, lines: mpsc::Sender<Vec<u8>>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        let trimmed = line.trim_ascii_end().to_vec();
        if lines.send(trimmed).await.is_err() {
            return Ok(());
        }
    }
}

async fn write_lines<W>(mut lines: mpsc::Receiver<Vec<u8>>, mut writer: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        debug!("Sending {} bytes", line.len());
        writer.write_all(&line).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
