use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::KvError;

/// Raw JSON body as sent by clients.
///
/// Field names match case-insensitively (`op`, `Op`, `OP` are the same field)
/// and unknown fields are ignored. Missing or `null` fields decode as empty
/// strings; any other non-string value is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(try_from = "Map<String, Value>")]
pub struct Request {
    pub op: String,
    pub key: String,
    // Ignored unless op is "SET".
    pub value: String,
}

impl TryFrom<Map<String, Value>> for Request {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut req = Request::default();
        for (name, value) in fields {
            let slot = match name.to_lowercase().as_str() {
                "op" => &mut req.op,
                "key" => &mut req.key,
                "value" => &mut req.value,
                _ => continue,
            };
            *slot = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => return Err(format!("field `{}` must be a string, got {}", name, other)),
            };
        }
        Ok(req)
    }
}

impl Request {
    pub fn get(key: &str) -> Self {
        Self {
            op: "GET".to_string(),
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn set(key: &str, value: &str) -> Self {
        Self {
            op: "SET".to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Get { key: String },
    Set { key: String, value: String },
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Get { .. } => "GET",
            Operation::Set { .. } => "SET",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Operation::Get { key } | Operation::Set { key, .. } => key,
        }
    }
}

impl TryFrom<Request> for Operation {
    type Error = KvError;

    fn try_from(req: Request) -> Result<Self, Self::Error> {
        match req.op.as_str() {
            "GET" => Ok(Operation::Get { key: req.key }),
            "SET" => Ok(Operation::Set {
                key: req.key,
                value: req.value,
            }),
            _ => Err(KvError::UnrecognizedOperation(req.op)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lowercase_fields() {
        let req: Request =
            serde_json::from_str(r#"{"op":"SET","key":"foo","value":"bar"}"#).unwrap();
        assert_eq!(req, Request::set("foo", "bar"));
    }

    #[test]
    fn test_decode_capitalised_fields() {
        let req: Request = serde_json::from_str(r#"{"Op":"GET","Key":"foo"}"#).unwrap();
        assert_eq!(req, Request::get("foo"));
    }

    #[test]
    fn test_field_names_match_any_case() {
        let req: Request =
            serde_json::from_str(r#"{"OP":"SET","KEY":"a","vAlUe":"b"}"#).unwrap();
        assert_eq!(req, Request::set("a", "b"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req: Request =
            serde_json::from_str(r#"{"op":"GET","key":"foo","ttl":30}"#).unwrap();
        assert_eq!(req, Request::get("foo"));
    }

    #[test]
    fn test_missing_and_null_fields_default_to_empty() {
        let req: Request = serde_json::from_str("{}").unwrap();
        assert_eq!(req, Request::default());

        let req: Request = serde_json::from_str(r#"{"op":"SET","key":"k","value":null}"#).unwrap();
        assert_eq!(req, Request::set("k", ""));
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let err = serde_json::from_str::<Request>(r#"{"op":"SET","key":5}"#).unwrap_err();
        assert!(err.to_string().contains("field `key` must be a string"));
        assert!(serde_json::from_str::<Request>(r#"["GET","foo"]"#).is_err());
    }

    #[test]
    fn test_serializes_lowercase_fields() {
        let json = serde_json::to_value(Request::set("foo", "bar")).unwrap();
        assert_eq!(json, serde_json::json!({"op":"SET","key":"foo","value":"bar"}));
    }

    #[test]
    fn test_get_ignores_value() {
        let req = Request {
            op: "GET".into(),
            key: "k".into(),
            value: "ignored".into(),
        };
        assert_eq!(
            Operation::try_from(req).unwrap(),
            Operation::Get { key: "k".into() }
        );
    }

    #[test]
    fn test_op_is_case_sensitive() {
        let err = Operation::try_from(Request {
            op: "get".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, KvError::UnrecognizedOperation("get".into()));
    }

    #[test]
    fn test_unknown_op_keeps_name() {
        let err = Operation::try_from(Request {
            op: "DELETE".into(),
            key: "foo".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Unrecognised Op: DELETE");
    }
}
