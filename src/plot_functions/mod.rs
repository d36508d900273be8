// src/plot_functions/mod.rs

pub mod plot_diagnostics;

// src/plot_functions/mod.rs
