//! In-memory string key-value store behind a single JSON endpoint.
//!
//! A client POSTs `{"op": "SET", "key": "foo", "value": "bar"}` or
//! `{"op": "GET", "key": "foo"}` to `/` and gets back
//! `{"status": 200, "value": "bar"}` or `{"status": 500, "error": "..."}`.

pub mod config;
pub mod cors;
pub mod dispatcher;
pub mod error;
pub mod kv_store;
pub mod logger;
pub mod server;
pub mod types;

pub use dispatcher::{Dispatcher, Outcome};
pub use error::{ConfigError, KvError};
pub use kv_store::{Database, KVStore};
pub use server::KvServer;
