use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A call from JavaScript to a bound host function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Sequence identifier used to route the reply.
    #[serde(deserialize_with = "seq_from_string_or_number")]
    pub id: String,
    /// Name of the bound function.
    pub method: String,
    /// Call arguments as a JSON array.
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl RpcRequest {
    /// Parse a call from a raw IPC body. Returns `None` for anything that
    /// is not an object with an id, a method and an array of params.
    pub fn from_json(raw: &str) -> Option<Self> {
        let request: Self = serde_json::from_str(raw).ok()?;
        if request.method.is_empty() || !request.params.is_array() {
            return None;
        }
        Some(request)
    }

    /// The arguments re-encoded as a JSON array string.
    pub fn params_json(&self) -> String {
        self.params.to_string()
    }
}

fn empty_params() -> Value {
    Value::Array(Vec::new())
}

fn seq_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seq {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Seq::deserialize(deserializer)? {
        Seq::Text(s) => s,
        Seq::Number(n) => n.to_string(),
    })
}
