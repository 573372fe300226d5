mod ids;
mod types;

pub use ids::RequestIdAllocator;
pub use types::{
    JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    RpcError, TOOL_ERROR_CODE, TRANSPORT_ERROR_CODE,
};
