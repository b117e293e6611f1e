//! JavaScript snippets injected into the page by the bridge.

/// Installs `window.__webview__`: the pending-promise table and the
/// sequence generator used by every bound function. Idempotent.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__webview__) {
        return;
    }
    var pending = {};
    var prefix = Math.random().toString(36).slice(2, 10);
    var counter = 0;
    window.__webview__ = {
        call: function(method, params) {
            var id = prefix + '-' + (++counter);
            var promise = new Promise(function(resolve, reject) {
                pending[id] = { resolve: resolve, reject: reject };
            });
            window.ipc.postMessage(JSON.stringify({
                id: id,
                method: method,
                params: params
            }));
            return promise;
        },
        onReply: function(id, status, result) {
            var entry = pending[id];
            if (!entry) {
                return;
            }
            delete pending[id];
            if (status === 0) {
                entry.resolve(result);
            } else {
                entry.reject(result);
            }
        }
    };
})();
"#;

/// Name reserved for the bridge object itself.
pub const BRIDGE_GLOBAL: &str = "__webview__";

/// Encode a string as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Define `window[name]` as an async function routed through the bridge.
pub fn binding_stub_script(name: &str) -> String {
    let name = js_string(name);
    format!(
        "window[{name}] = function() {{ \
         return window.__webview__.call({name}, Array.prototype.slice.call(arguments)); }};"
    )
}

/// Remove a previously installed binding stub.
pub fn unbind_script(name: &str) -> String {
    format!("delete window[{}];", js_string(name))
}

/// Settle a pending call. `result_json` must already be valid JSON.
pub fn reply_script(seq: &str, success: bool, result_json: &str) -> String {
    let status = if success { 0 } else { 1 };
    format!(
        "window.__webview__.onReply({}, {status}, {result_json});",
        js_string(seq)
    )
}
