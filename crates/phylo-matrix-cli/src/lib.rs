//! Command-line front end for phylo-matrix.
//!
//! Each subcommand reads shape-less matrix text files (the shape comes from
//! the command line), applies one operation and prints the result in the
//! canonical text layout.
pub mod commands;
pub mod config;
