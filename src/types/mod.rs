pub mod request;
pub mod response;

pub use request::{Operation, Request};
pub use response::Response;
