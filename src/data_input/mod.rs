// src/data_input/mod.rs

pub mod dataset;

// src/data_input/mod.rs
