//! One module per subcommand, each exposing `handle`.

pub mod expand;
pub mod graph;
pub mod rules;
