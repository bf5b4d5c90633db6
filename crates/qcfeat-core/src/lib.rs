//! # qcfeat Core Library
//!
//! Parsing and feature derivation for per-molecule quantum-chemistry descriptors:
//! atomic charges, bond orders, overlap charges, bond lengths and nearest-neighbor
//! lists, as exported by a reaction-network calculation pipeline.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Data models (atoms, bonds, molecules, feature
//!   vectors), the descriptor field grammars, missing-value rules, descriptive
//!   statistics and CSV I/O.
//!
//! - **[`engine`]: The Per-Molecule Pipeline.** Index reconciliation, bond matching
//!   and feature aggregation, plus configuration, diagnostics and progress events.
//!
//! - **[`workflows`]: The Public API.** Whole-table procedures: featurize a
//!   descriptor table, summarize a feature table, assemble reaction-level rows.

pub mod core;
pub mod engine;
pub mod workflows;
