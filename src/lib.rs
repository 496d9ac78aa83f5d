//! ClipShelf binary support: command-line parsing and process bootstrap.

pub mod bootstrap;
pub mod cli;
