//! Miscellaneous utility functions for trek.
//!
//! [helpers] holds the home directory and clamping utilities, [cli] the command line
//! arguments.

pub mod cli;
pub mod helpers;

pub use helpers::{clamp_setting, expand_home_path, get_home, shorten_home_path};
