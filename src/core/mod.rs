// src/core/mod.rs

pub mod expander;
pub mod formatter;
pub mod graph_export;
pub mod manifest;
pub mod store;
