// geckolog - core/mod.rs
//
// Core classification logic layer.
// Pure functions over line slices; no filesystem access.
// Must NOT depend on the app layer.

pub mod classify;
pub mod model;
pub mod region;
pub mod whitelist;
