//! Cleanse: Tabular Data Cleaning Library
//!
//! A library for cleaning tables by normalizing value formats,
//! imputing missing values and removing IQR outliers.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
