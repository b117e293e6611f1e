use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decode a JSON argument array into `A`.
///
/// Tuples match positional arguments. A zero-argument call (`[]`) also
/// decodes into `()`.
pub fn decode_args<A: DeserializeOwned>(req: &str) -> Result<A, serde_json::Error> {
    match serde_json::from_str::<A>(req) {
        Ok(args) => Ok(args),
        Err(err) => match serde_json::from_str::<Value>(req) {
            Ok(Value::Array(items)) if items.is_empty() => {
                serde_json::from_value(Value::Null).map_err(|_| err)
            }
            _ => Err(err),
        },
    }
}

/// Run a typed binding against a raw request.
/// Returns `(success, result_json)` ready for `return_raw`.
pub(crate) fn typed_reply<A, R, E, F>(f: &F, req: &str) -> (bool, String)
where
    A: DeserializeOwned,
    R: Serialize,
    E: Display,
    F: Fn(A) -> Result<R, E>,
{
    let args = match decode_args::<A>(req) {
        Ok(args) => args,
        Err(e) => return (false, error_json(&format!("invalid arguments: {e}"))),
    };
    match f(args) {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => (true, json),
            Err(e) => (false, error_json(&format!("failed to encode result: {e}"))),
        },
        Err(e) => (false, error_json(&e.to_string())),
    }
}

fn error_json(message: &str) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| "\"error\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add((a, b): (i64, i64)) -> Result<i64, String> {
        Ok(a + b)
    }

    #[test]
    fn tuple_matches_positional_arguments() {
        let (a, b): (i64, String) = decode_args(r#"[1, "x"]"#).unwrap();
        assert_eq!((a, b.as_str()), (1, "x"));
    }

    #[test]
    fn unit_accepts_zero_arguments() {
        let () = decode_args("[]").unwrap();
        assert!(decode_args::<()>("[1]").is_err());
    }

    #[test]
    fn vec_of_values_accepts_anything() {
        let args: Vec<Value> = decode_args(r#"[1, {"a": null}]"#).unwrap();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn typed_reply_success() {
        assert_eq!(typed_reply(&add, "[2, 3]"), (true, "5".to_string()));
    }

    #[test]
    fn typed_reply_reports_bad_arguments() {
        let (ok, json) = typed_reply(&add, r#"["two", 3]"#);
        assert!(!ok);
        let message: String = serde_json::from_str(&json).unwrap();
        assert!(message.starts_with("invalid arguments"));
    }

    #[test]
    fn typed_reply_reports_callback_error() {
        let fail = |(): ()| Err::<i64, _>("nope");
        assert_eq!(typed_reply(&fail, "[]"), (false, "\"nope\"".to_string()));
    }

    #[test]
    fn typed_reply_serializes_structs() {
        #[derive(Serialize)]
        struct Info {
            name: &'static str,
        }
        let info = |(): ()| Ok::<_, String>(Info { name: "webviews" });
        assert_eq!(
            typed_reply(&info, "[]"),
            (true, r#"{"name":"webviews"}"#.to_string())
        );
    }
}
