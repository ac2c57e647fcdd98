//! HTTP gateway for the Burrow URL shortener.
//!
//! Routes:
//!
//! | method   | path           | action                              |
//! |----------|----------------|-------------------------------------|
//! | `POST`   | `/shorten`     | shorten a batch of URLs             |
//! | `GET`    | `/links`       | list every link                     |
//! | `DELETE` | `/links`       | remove every link                   |
//! | `GET`    | `/{shortCode}` | `302` to the original URL           |
//! | `GET`    | `/health`      | liveness probe                      |

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
