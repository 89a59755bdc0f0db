//! CLI command implementations

pub mod apply;
pub mod filters;
pub mod run;
pub mod validate;
