//! Data structures describing molecules, their atoms and bonds, and the
//! features derived from them.
//!
//! All atom indices stored in these types are 1-based. Conversion from the
//! 0-based indices some descriptor fields use happens before any value reaches
//! this module (see [`crate::engine::reconcile`]).

pub mod atom;
pub mod bond;
pub mod features;
pub mod molecule;
