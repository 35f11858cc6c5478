//! Hostpatch - managed hosts-file rules for GitHub and Replit.

pub mod backup;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod platform;
pub mod report;
pub mod rules;
pub mod target;
pub mod writer;
