//! Tool server transport: the [`ToolInvoker`] seam, its HTTP implementation
//! and the classification of JSON-RPC responses into results or failures.

mod error;
mod http;
mod interface;
mod outcome;

pub use error::ToolInvokeError;
pub use http::HttpToolInvoker;
pub use interface::ToolInvoker;
pub use outcome::{render_tool_output, resolve_response};
