//! # Workflows Module
//!
//! Table-level entry points that tie the [`crate::engine`] stages and the
//! [`crate::core`] I/O together.
//!
//! ## Overview
//!
//! - **Featurize Workflow** ([`featurize`]) - turns a descriptor table into a feature
//!   table: one row per molecule, fixed statistic columns plus optional per-atom and
//!   per-bond columns.
//! - **Summarize Workflow** ([`summarize`]) - descriptive statistics over the columns
//!   of a feature table.
//! - **Assemble Workflow** ([`assemble`]) - folds a molecule-level feature table into
//!   one fixed-width row per reaction.
//!
//! Every workflow reports its phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and fails only on
//! run-level problems; per-row problems surface as
//! [`Diagnostic`](crate::engine::diagnostics::Diagnostic)s.

pub mod assemble;
pub mod featurize;
pub mod summarize;
