//! MiniArc: session core for a minimal mobile web-browser shell.
//!
//! Resolves typed text into URLs, keeps a registry of tabs bound to content
//! sessions, drives the bottom toolbar's mode machine and records visits.
//! This library crate exposes all modules for use by the binaries and
//! integration tests.

pub mod app;
pub mod content;
#[cfg(feature = "persistence")]
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
