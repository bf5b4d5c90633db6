//! # Engine Module
//!
//! The per-molecule pipeline stages that sit between the raw descriptor
//! grammars in [`crate::core::parsing`] and the table-level workflows.
//!
//! ## Stages
//!
//! Each input row passes through the stages in this order:
//!
//! - **Index reconciliation** ([`reconcile`]) - shifts 0-based indices to the 1-based convention
//! - **Bond matching** ([`matching`]) - joins order, overlap-charge and length records per bond
//! - **Feature aggregation** ([`features`]) - reduces a molecule to its fixed-width feature vector
//!
//! Rows never share state, so the stages are plain functions over owned data.
//!
//! ## Support
//!
//! - **Configuration** ([`config`]) - featurization settings and their builder
//! - **Diagnostics** ([`diagnostics`]) - recoverable per-row problems, logged and collected
//! - **Progress Monitoring** ([`progress`]) - phase and task events for front ends
//! - **Error Handling** ([`error`]) - fatal, run-level errors

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod matching;
pub mod progress;
pub mod reconcile;
