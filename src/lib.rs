//! Scheduled retention enforcement for a shared filesystem tree.
//!
//! A rule-set document maps producer components to rules; each rule names
//! a base directory, glob patterns, an age threshold in hours, and an
//! action. One [`sweep::sweep`] call evaluates every rule, deleting or
//! archiving whatever has aged past its threshold, and returns a
//! [`report::SweepReport`] describing everything it did.

pub mod age;
pub mod archiver;
pub mod config;
pub mod deleter;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod output;
pub mod report;
pub mod rule;
pub mod sweep;
pub mod utils;
