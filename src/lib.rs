pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod optimizer;
pub mod rng;
pub mod scorer;
pub mod solution;
pub mod words;
// cmd and reports are modules of the binary crate (main.rs).
