//! Chat relay server library - HTTP front end for the chatbot relay.
//!
//! Routes, configuration, logging and application state live here so that
//! integration tests can drive the router without starting the binary.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
