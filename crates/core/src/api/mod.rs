//! Event request/response models and the handler error taxonomy.

mod error;
mod types;

pub use error::HandlerError;
pub use types::{
    DeleteRequest, DeleteResponse, GetRequest, PutRequest, ReadResponse, Request, Response,
};
