//! Networking and service bootstrap for the workout tracker
//!
//! This crate provides the shared HTTP client with retry logic, the remote
//! API and repository built on it, and the container that wires them
//! together once at process start.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod container;
pub mod remote;

pub use client::{HttpClient, HttpClientConfig, NetworkError};
pub use container::{AppContainer, ContainerConfig};
pub use remote::{RemoteApi, RemoteRepository, RemoteSource};
