//! Stdio transport: the whole process serves a single caller
//!
//! Newline-delimited JSON-RPC messages arrive on stdin, responses leave on stdout, and
//! logs go to stderr. Each response is flushed before the next line is read.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::mcp::context::{TransportContext, TransportKind};
use crate::mcp::rpc::{json_rpc_error, PARSE_ERROR};
use crate::AppState;

pub async fn serve_stdio(state: AppState) -> std::io::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(state, stdin, stdout).await
}

/// Returns `Ok(())` once the reader reaches end of input.
pub async fn serve<R, W>(state: AppState, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut context = TransportContext::open(state, TransportKind::Stdio);
    let mut line = Vec::new();

    info!("mcp server ready for requests on stdio");

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let frame = line.trim_ascii();
        if frame.is_empty() {
            continue;
        }

        // Invalid UTF-8 is rejected by the JSON decoder like any other malformed frame.
        let response = match serde_json::from_slice(frame) {
            Ok(payload) => context.dispatch(payload).await,
            Err(err) => {
                debug!(error = %err, "discarding unparsable frame");
                Some(json_rpc_error(None, PARSE_ERROR, "Parse error"))
            }
        };

        let Some(response) = response else {
            continue;
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    info!(messages = context.messages(), "stdin closed, shutting down");
    Ok(())
}
