// src/lib.rs
// Public library surface for integration tests (and embedding in a collector host).

pub mod backend;
pub mod client;
pub mod config;
pub mod connector;
pub mod runner;

// ---- Re-exports for stable public API ----
pub use backend::ItemSource;
pub use client::{DockerHubClient, RegistryClient};
pub use connector::{DockerHub, CATEGORY_DOCKERHUB_DATA};
pub use runner::{run_once, RawItem};
