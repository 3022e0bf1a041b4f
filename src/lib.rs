// src/lib.rs

#[macro_use]
mod macros;
#[macro_use]
pub mod log;

pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod file;
pub mod gateway;
pub mod lexicon;
pub mod progress;
pub mod report;
pub mod runner;
pub mod scrape;
pub mod store;

pub use classify::{Classifier, ScriptVariant};
pub use error::{Error, GatewayError, Result};
pub use lexicon::Lexicon;
pub use store::{Entity, EntityStore};
