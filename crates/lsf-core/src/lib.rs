//! Core of the LSF grade automation.
//!
//! Holds the data model for scraped table rows, the column mapping of the
//! grade overview, decimal handling, the grade aggregator, report sinks,
//! credentials and command-line settings. Nothing in here talks to a browser.

pub mod aggregator;
pub mod column_map;
pub mod credentials;
pub mod error;
pub mod formatting;
pub mod models;
pub mod numeric;
pub mod settings;
pub mod sink;

pub use error::{LsfError, Result};
