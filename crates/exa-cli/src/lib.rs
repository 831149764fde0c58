//! Library components of the `excel-analytics` command line tool.

pub mod config;
pub mod logging;
