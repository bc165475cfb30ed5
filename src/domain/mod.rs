// Core domain for stackfold: pure trace parsing and tree aggregation.
// Nothing in here performs I/O; raw text comes in, a report comes out.

pub mod calltree;
pub mod report;
pub mod signature;
pub mod trace;
