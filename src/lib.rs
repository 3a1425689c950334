//! chitchat - a terminal chat client with real-time thread sync
//!
//! The library holds everything but `main`: the REST client, the socket
//! transport, the thread reconciler and the terminal UI. It is exposed for
//! integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod subscription;
pub mod terminal;
pub mod thread;
pub mod traits;
pub mod ui;
pub mod websocket;
