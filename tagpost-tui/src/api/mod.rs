mod client;
mod error;

pub use client::{ApiClient, FriendsSource, DEFAULT_SERVER_URL};
pub use error::{ApiError, ApiResult};
