pub mod gateway;
pub mod pool;
pub mod request;

pub use gateway::{classify, describe_request, Gateway, RequestGateway};
pub use request::{BodyParams, QueryParams, RequestDescriptor};
