//! # mason
//!
//! A minimal build-description engine. A build manifest declares templated
//! shell commands and a tree of configuration variants; `mason` expands
//! every path through the tree into a concrete command string, leaving the
//! per-invocation `{input}`/`{output}` placeholders for a build driver to
//! bind, and records the build rules that reference those commands.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
