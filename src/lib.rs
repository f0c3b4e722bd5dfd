//! Low resolution histograms, bar charts, line graphs and scatter plots of
//! delimited text records.
//!
//! # Getting Started
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! cligraph = "*"
//! ```
//!
//! ```rust,no_run
//! use cligraph::bins::BinSpec;
//! use cligraph::plot::{Histogram, HistogramOptions};
//! use cligraph::style::{HistType, Style};
//!
//! let vec = [-1.0, -1.1, 2.0, 2.0, 2.1, -0.9, 11.0, 11.2, 1.9, 1.99];
//! // Plot a histogram of the above values, with 4 buckets and a precision
//! // chosen by library
//! let histogram = Histogram::new(
//!     &vec,
//!     &BinSpec::Count(4),
//!     Style::default(),
//!     HistType::Bar,
//!     HistogramOptions::default(),
//! );
//! print!("{}", histogram);
//! ```
//!
//! The `cligraph` binary reads records from files or standard input; see
//! [`chart`] for the drivers behind every subcommand.

#[macro_use]
extern crate log;
#[macro_use]
extern crate derive_builder;

pub mod aggregate;
pub mod app;
pub mod bins;
pub mod chart;
pub mod config;
pub mod error;
mod format;
pub mod plot;
pub mod read;
pub mod stats;
pub mod style;

pub use error::{Error, Result};
