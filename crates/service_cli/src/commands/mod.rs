//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; `pipeline` holds the
//! steps they share.

pub mod analyse;
pub mod generate;
pub mod pipeline;
pub mod project;
pub mod run;
