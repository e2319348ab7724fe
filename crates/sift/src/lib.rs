//! sift: inspect full-text search queries from the command line.
//!
//! The `sift` binary wires the [`sift_query`] parser, the [`sift_analysis`]
//! analyzers and [`sift_config`] settings together. It parses queries and
//! prints the resulting tree, repairs query text, shows analyzer output, and
//! manages `.sift.toml` configuration files.

#![warn(missing_docs)]
