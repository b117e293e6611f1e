use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use webviews_common::WebviewError;

use crate::webview::WebviewHandle;

use super::message::RpcRequest;
use super::script::BRIDGE_GLOBAL;

/// Host side of a binding: receives the handle, the call sequence and the
/// JSON array of arguments.
pub(crate) type RawHandler = Arc<dyn Fn(&WebviewHandle, &str, &str) + Send + Sync>;

/// Reject names that would be unusable or clobber the bridge itself.
pub fn validate_binding_name(name: &str) -> Result<(), WebviewError> {
    if name.trim().is_empty() || name == BRIDGE_GLOBAL || name.contains('\0') {
        return Err(WebviewError::InvalidBindingName(name.to_string()));
    }
    Ok(())
}

/// Registry of bound functions and the calls awaiting a reply.
#[derive(Default)]
pub struct RpcBridge {
    bindings: HashMap<String, RawHandler>,
    /// seq -> method name
    pending: HashMap<String, String>,
}

impl RpcBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, name: &str, handler: RawHandler) -> Result<(), WebviewError> {
        validate_binding_name(name)?;
        if self.bindings.contains_key(name) {
            return Err(WebviewError::AlreadyBound(name.to_string()));
        }
        self.bindings.insert(name.to_string(), handler);
        Ok(())
    }

    /// Remove a binding. Calls already in flight can still be answered.
    pub fn unbind(&mut self, name: &str) -> Result<(), WebviewError> {
        self.bindings
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WebviewError::NotBound(name.to_string()))
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Record an incoming call and return its handler, or `None` if the
    /// method is not bound.
    pub(crate) fn begin(&mut self, request: &RpcRequest) -> Option<RawHandler> {
        let handler = Arc::clone(self.bindings.get(&request.method)?);
        if let Some(previous) = self
            .pending
            .insert(request.id.clone(), request.method.clone())
        {
            debug!(seq = %request.id, %previous, "sequence reused; previous call dropped");
        }
        Some(handler)
    }

    /// Mark a call answered. Returns the method name it was made to.
    pub fn complete(&mut self, seq: &str) -> Result<String, WebviewError> {
        self.pending
            .remove(seq)
            .ok_or_else(|| WebviewError::UnknownSequence(seq.to_string()))
    }

    pub fn is_pending(&self, seq: &str) -> bool {
        self.pending.contains_key(seq)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forget every unanswered call; returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Drop all bindings and pending calls.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> RawHandler {
        Arc::new(|_: &WebviewHandle, _: &str, _: &str| {})
    }

    fn call(id: &str, method: &str) -> RpcRequest {
        RpcRequest {
            id: id.into(),
            method: method.into(),
            params: serde_json::json!([]),
        }
    }

    #[test]
    fn bind_and_unbind() {
        let mut bridge = RpcBridge::new();
        bridge.bind("add", noop()).unwrap();
        assert!(bridge.is_bound("add"));

        bridge.unbind("add").unwrap();
        assert!(!bridge.is_bound("add"));
    }

    #[test]
    fn duplicate_bind_is_rejected() {
        let mut bridge = RpcBridge::new();
        bridge.bind("add", noop()).unwrap();
        let err = bridge.bind("add", noop()).unwrap_err();
        assert!(matches!(err, WebviewError::AlreadyBound(ref n) if n == "add"));
    }

    #[test]
    fn unbind_unknown_is_rejected() {
        let mut bridge = RpcBridge::new();
        assert!(matches!(
            bridge.unbind("nope"),
            Err(WebviewError::NotBound(_))
        ));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut bridge = RpcBridge::new();
        for name in ["", "   ", "__webview__", "a\0b"] {
            assert!(matches!(
                bridge.bind(name, noop()),
                Err(WebviewError::InvalidBindingName(_))
            ));
        }
    }

    #[test]
    fn names_are_sorted() {
        let mut bridge = RpcBridge::new();
        bridge.bind("zeta", noop()).unwrap();
        bridge.bind("alpha", noop()).unwrap();
        assert_eq!(bridge.names(), ["alpha", "zeta"]);
    }

    #[test]
    fn begin_tracks_pending_until_complete() {
        let mut bridge = RpcBridge::new();
        bridge.bind("add", noop()).unwrap();

        assert!(bridge.begin(&call("s1", "add")).is_some());
        assert!(bridge.is_pending("s1"));

        assert_eq!(bridge.complete("s1").unwrap(), "add");
        assert!(matches!(
            bridge.complete("s1"),
            Err(WebviewError::UnknownSequence(_))
        ));
    }

    #[test]
    fn begin_unbound_method_records_nothing() {
        let mut bridge = RpcBridge::new();
        assert!(bridge.begin(&call("s1", "missing")).is_none());
        assert_eq!(bridge.pending_count(), 0);
    }

    #[test]
    fn pending_call_survives_unbind() {
        let mut bridge = RpcBridge::new();
        bridge.bind("add", noop()).unwrap();
        bridge.begin(&call("s1", "add"));
        bridge.unbind("add").unwrap();
        assert!(bridge.complete("s1").is_ok());
    }

    #[test]
    fn discard_pending_drops_calls() {
        let mut bridge = RpcBridge::new();
        bridge.bind("f", noop()).unwrap();
        bridge.begin(&call("a", "f"));
        bridge.begin(&call("b", "f"));

        assert_eq!(bridge.discard_pending(), 2);
        assert_eq!(bridge.pending_count(), 0);
        assert!(bridge.is_bound("f"));
    }
}
