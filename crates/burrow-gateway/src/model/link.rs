use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub original_url: String,
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearLinksResponse {
    pub message: String,
    pub links_removidos: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
