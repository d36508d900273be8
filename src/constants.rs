// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, RED};
use plotters::style::RGBColor;

// Required dataset columns.
pub const COLUMN_TEMPERATURE: &str = "temperature";
pub const COLUMN_RAINFALL: &str = "rainfall";
pub const COLUMN_MOSQUITOS: &str = "mosquitos";

// Coefficient names in reporting order.
pub const COEFFICIENT_NAMES: [&str; 3] = ["Intercept", COLUMN_TEMPERATURE, COLUMN_RAINFALL];

// Figure dimensions in inches, and the default raster resolution.
pub const FIGURE_WIDTH_IN: f64 = 6.0;
pub const FIGURE_HEIGHT_IN: f64 = 9.0;
pub const DEFAULT_DPI: u32 = 100;

// Relative tolerance on σ_k / σ_max below which a design direction counts as dependent.
pub const RANK_RELATIVE_TOLERANCE: f64 = 1e-10;

// Residual norm at or below this fraction of the centered response spread is a perfect fit.
pub const PERFECT_FIT_RELATIVE_TOLERANCE: f64 = 1e-10;

// --- Panel Axis Labels ---
pub const LABEL_PREDICTED: &str = "predicted mosquito population";
pub const LABEL_MEASURED: &str = "measured mosquito population";

// --- Marker Assignments ---
pub const COLOR_PREDICTED_VS_MEASURED: &RGBColor = &GREEN;
pub const COLOR_TEMPERATURE: &RGBColor = &RED;
pub const COLOR_RAINFALL: &RGBColor = &BLUE;
pub const MARKER_SIZE_PX: u32 = 5;

// --- Font Sizes ---
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_TICK_LABEL: i32 = 10;

// Padding around each panel, in pixels.
pub const PANEL_MARGIN_PX: u32 = 8;

// Number of tick labels per axis.
pub const TICK_LABEL_COUNT: usize = 6;

// src/constants.rs
