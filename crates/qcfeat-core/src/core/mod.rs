//! # Core Module
//!
//! Stateless building blocks shared by every stage of featurization.
//!
//! - **Data Models** ([`models`]) - atoms, bonds, molecules and feature vectors
//! - **Missing Data** ([`missing`]) - the one predicate deciding what counts as measured
//! - **Descriptor Grammars** ([`parsing`]) - raw field text to structured records
//! - **Statistics** ([`stats`]) - descriptive statistics over measured values
//! - **Table I/O** ([`io`]) - descriptor and feature tables as CSV files

pub mod io;
pub mod missing;
pub mod models;
pub mod parsing;
pub mod stats;
