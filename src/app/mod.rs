#[allow(clippy::module_inception)]
pub mod app;
pub mod seed;
