pub mod assemble;
pub mod featurize;
pub mod summarize;
