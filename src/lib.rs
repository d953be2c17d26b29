// geckolog - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// for embedding in the test harness.
//
// The CLI lives in `main.rs` and is not part of the library surface.

pub mod app;
pub mod core;
pub mod util;
