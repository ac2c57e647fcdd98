mod link;

pub use link::{ClearLinksResponse, HealthResponse, LinkResponse, ShortenRequest};
