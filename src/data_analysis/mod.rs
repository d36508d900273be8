// src/data_analysis/mod.rs

pub mod analyzer;
pub mod fit_result;
pub mod ols;

// src/data_analysis/mod.rs
