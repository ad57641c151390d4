//! End-to-end scenarios for the notes service.
//!
//! The suite talks to the service at `BASE_URL` (default
//! `http://localhost:3000`) and writes its report to `allure-results`. Run it
//! with `cargo test -p notes-api-tests --features live-server`.

pub mod scenarios;

#[cfg(all(test, feature = "live-server"))]
mod lifecycle;
#[cfg(all(test, feature = "live-server"))]
mod read;
