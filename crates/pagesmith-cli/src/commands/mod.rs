//! CLI command implementations

pub mod compile;
pub mod init;
pub mod tree;
pub mod validate;
