// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod progress;
pub mod scrape;
pub mod source;
pub mod specs;
pub mod store;
pub mod update;

pub use error::{Error, FetchError, ModelError, StoreError};
pub use model::BusNetwork;
