//! Shared library surface for the safepath server and its tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod graph;
pub mod map;
pub mod state;
