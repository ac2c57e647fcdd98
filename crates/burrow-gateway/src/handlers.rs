mod health;
mod links;

pub use health::health_handler;
pub use links::{clear_links_handler, list_links_handler, redirect_handler, shorten_handler};
