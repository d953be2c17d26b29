// geckolog - app/mod.rs
//
// Application layer: file-backed log access and the live suppression
// session. Dependencies: core layer.

pub mod gecko_log;
pub mod suppress;
