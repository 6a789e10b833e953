pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod preprocess;
pub mod service;
pub mod util;

#[cfg(test)]
pub mod testing;
