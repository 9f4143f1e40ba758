//! NASA Astronomy Picture of the Day API: client, record type and mapping.

pub mod http;
pub mod transform;
pub mod types;

pub use http::{ApodClient, APOD_ENDPOINT};
pub use transform::transform;
pub use types::ApodRecord;
