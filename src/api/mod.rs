pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::{ApiError, QueryError, RequestRejection};
pub use extract::{JsonBody, PathParam};
pub use router::create_router;
pub use types::*;
