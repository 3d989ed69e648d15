//! Browser side of the LSF grade automation.
//!
//! Defines the [`driver::SessionDriver`] seam, implements it over WebDriver
//! with `fantoccini`, and builds the login and grade-table flows on top.

pub mod auth;
pub mod driver;
pub mod error;
pub mod extractor;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod webdriver;

pub use lsf_core as core;
