pub mod app;
pub mod cli;
pub mod config;
pub mod gate;
pub mod host;
pub mod input;
pub mod logging;
pub mod mvi;
pub mod shutdown;
