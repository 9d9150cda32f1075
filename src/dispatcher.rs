use actix_web::http::StatusCode;
use log::{debug, trace, warn};

use crate::error::{KvError, Result};
use crate::kv_store::Database;
use crate::types::{Operation, Request, Response};

/// Successful result of applying one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(String),
    Stored,
}

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Value(value) => Response::with_value(value),
            Outcome::Stored => Response::ok(),
        }
    }
}

/// Routes decoded operations to a [`Database`].
pub struct Dispatcher<D> {
    db: D,
}

impl<D: Database> Dispatcher<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    pub async fn apply(&self, op: Operation) -> Result<Outcome> {
        match op {
            Operation::Get { key } => match self.db.get(&key).await? {
                Some(value) => Ok(Outcome::Value(value)),
                None => Err(KvError::KeyNotFound),
            },
            Operation::Set { key, value } => {
                self.db.set(&key, value).await?;
                Ok(Outcome::Stored)
            }
        }
    }

    pub async fn dispatch(&self, req: Request) -> Result<Outcome> {
        let op = Operation::try_from(req)?;
        trace!("dispatching {} {:?}", op.kind(), op.key());
        self.apply(op).await
    }

    /// Decodes a raw JSON body, applies it and builds the reply.
    pub async fn dispatch_bytes(&self, body: &[u8]) -> (StatusCode, Response) {
        let result = match serde_json::from_slice::<Request>(body) {
            Ok(req) => self.dispatch(req).await,
            Err(e) => {
                debug!("rejecting undecodable body: {}", e);
                Err(KvError::MalformedRequest(e.to_string()))
            }
        };

        let rsp = match result {
            Ok(outcome) => Response::from(outcome),
            Err(err) => {
                if !matches!(err, KvError::MalformedRequest(_)) {
                    warn!("request failed: {}", err);
                }
                Response::from(&err)
            }
        };
        (rsp.status_code(), rsp)
    }
}
