//! Pixel Python (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can use `pixel_python::{core,engine,types}`.

pub use pixel_python_core as core;
pub use pixel_python_engine as engine;
pub use pixel_python_types as types;
