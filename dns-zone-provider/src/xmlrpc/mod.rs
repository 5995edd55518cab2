//! XML-RPC transport: value model, codec and HTTP client.

mod client;
mod codec;
mod value;

pub use client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, XmlRpcClient};
pub use codec::{CodecError, Fault, MethodResponse, decode_response, encode_call};
pub use value::{Struct, Value};

// 服务端方向的编解码，仅供测试扮演 XML-RPC 服务
#[cfg(any(test, feature = "test-utils"))]
pub use codec::{MethodCall, decode_call, encode_response};
