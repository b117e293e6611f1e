//! RPC bridge between JavaScript and host callbacks.
//!
//! Messages flow in both directions:
//! - **JS -> host**: a bound global calls
//!   `window.ipc.postMessage(JSON.stringify({id, method, params}))`,
//!   which reaches the engine's IPC handler.
//! - **host -> JS**: replies are delivered by evaluating
//!   `window.__webview__.onReply(id, status, result)`, which settles the
//!   promise returned to the caller.

mod bridge;
mod message;
pub mod script;
mod typed;

pub use bridge::{validate_binding_name, RpcBridge};
pub use message::RpcRequest;
pub use typed::decode_args;

pub(crate) use bridge::RawHandler;
pub(crate) use typed::typed_reply;
