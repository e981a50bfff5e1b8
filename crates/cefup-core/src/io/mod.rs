//! Filesystem and network primitives shared by the pipeline stages.

pub mod download;
pub mod extract;
pub mod fsops;
