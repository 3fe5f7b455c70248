//! Business-lending risk scoring.
//!
//! The core is [`scoring::assess`]: a pure function from a loan application
//! ([`assessment::AssessmentInput`]) to a score, level, approval decision and
//! recommendations ([`assessment::AssessmentOutput`]). Everything else is
//! plumbing around it: configurable weights, config loading, and report
//! formatting for the CLI.

pub mod assessment;
pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
