use async_trait::async_trait;

use crate::rpc::{JsonRpcRequest, JsonRpcResponse};

/// One JSON-RPC round trip against the tool server.
///
/// Implementations never fail: transport problems come back as a response
/// whose `error` carries [`crate::rpc::TRANSPORT_ERROR_CODE`], so transport and
/// tool failures share one result channel. No retries happen at this layer.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, request: JsonRpcRequest) -> JsonRpcResponse;
}
