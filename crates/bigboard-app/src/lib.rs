// Big board application: config, snapshot source, text views and CSV export
// on top of bigboard-core.

pub mod app;
pub mod config;
pub mod export;
pub mod render;
pub mod source;
