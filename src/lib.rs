//! Live plot of a numeric stream read line by line from stdin.
//!
//! The producer writes one floating point value per line and finishes with
//! `STOP`; the plotter then saves a PNG snapshot into the plots folder and
//! closes its window.
pub mod config;
pub mod drivers;
pub mod gui;
pub mod types;
