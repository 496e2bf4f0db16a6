//! HTTP server exposing parsing, presentation and prompt rendering as JSON
//! endpoints. The server never calls a language model itself.
//!
//! # Endpoints
//!
//! - `GET  /health`           — Liveness probe
//! - `POST /analyze`          — Parse an analysis response into a turn view
//! - `POST /prompts/analysis` — Render the analysis prompt
//! - `POST /prompts/reply`    — Render the reply prompt (crisis or standard)
//! - `POST /reply/format`     — Prepare a generated reply for display

pub mod routes;

pub use routes::{app_router, AppState};
