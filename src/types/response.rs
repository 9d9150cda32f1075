use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::KvError;

/// JSON body written back for every request on the store endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            ..Default::default()
        }
    }

    pub fn with_value(value: String) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            value: Some(value),
            error: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<&KvError> for Response {
    fn from(err: &KvError) -> Self {
        Self {
            status: err.status().as_u16(),
            value: None,
            error: Some(err.to_string()),
        }
    }
}
