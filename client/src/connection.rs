//! Native `ConnectionT` implementation over a `jsonrpsee` WebSocket client.
//!
//! Grounded on the teacher's `client/src/connection/native.rs`, which used
//! `jsonrpsee::http_client::HttpClient` — that client can't support
//! subscriptions, and the Base Client's event loop lives entirely on one.
//! Swapped for `WsClient`/`WsClientBuilder`, which the workspace already
//! enables via the `ws-client` jsonrpsee feature.

use lumen_core::connection::JsonRpcConnection;
use lumen_core::error::{Error, Result};

pub use lumen_core::connection::{ConnectionState, ConnectionT, SubscribeItem};

pub type Connection = JsonRpcConnection<jsonrpsee::ws_client::WsClient>;

pub async fn connect(endpoint: &str) -> Result<Connection> {
    let url = format!("ws://{}", endpoint);
    let client = jsonrpsee::ws_client::WsClientBuilder::default()
        .build(&url)
        .await
        .map_err(|e| Error::RpcError(e.to_string()))?;
    Ok(JsonRpcConnection::new(url, client))
}
