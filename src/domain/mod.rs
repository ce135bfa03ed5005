// Domain types for livetrace.

pub mod report;
pub mod source;
