//! Memora control plane: thin HTTP clients for the memory dataplane
//! and the proxy service that forwards browser requests to it.
//!
//! All agent and memory state lives in the dataplane; this crate only
//! marshals requests and unmarshals responses. See [`api`] for the
//! typed endpoint bindings and [`dataplane`] for the hand-written
//! proxy/direct clients.

pub mod api;
pub mod config;
pub mod dataplane;
pub mod error;
pub mod routes;
pub mod state;
