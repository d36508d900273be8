// src/plot_functions/plot_diagnostics.rs

use crate::constants::{
    COLOR_PREDICTED_VS_MEASURED, COLOR_RAINFALL, COLOR_TEMPERATURE, COLUMN_MOSQUITOS,
    COLUMN_RAINFALL, COLUMN_TEMPERATURE, LABEL_MEASURED, LABEL_PREDICTED, MARKER_SIZE_PX,
};
use crate::data_input::dataset::Dataset;
use crate::plot_framework::{Figure, MarkerShape, MarkerStyle, Panel};

fn scatter(
    xs: &[f64],
    ys: &[f64],
    x_label: &str,
    y_label: &str,
    shape: MarkerShape,
    color: plotters::style::RGBColor,
) -> Panel {
    Panel {
        points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        marker: MarkerStyle {
            shape,
            color,
            size: MARKER_SIZE_PX,
        },
    }
}

/// Builds the three stacked diagnostic panels:
/// predicted vs measured (green diamonds), temperature vs mosquitos
/// (red circles) and rainfall vs mosquitos (blue squares).
pub fn build_diagnostic_figure(
    mut figure: Figure,
    dataset: &Dataset,
    predicted: &[f64],
) -> Figure {
    let measured = dataset.mosquitos();

    figure.panels = vec![
        scatter(
            predicted,
            measured,
            LABEL_PREDICTED,
            LABEL_MEASURED,
            MarkerShape::Diamond,
            *COLOR_PREDICTED_VS_MEASURED,
        ),
        scatter(
            dataset.temperature(),
            measured,
            COLUMN_TEMPERATURE,
            COLUMN_MOSQUITOS,
            MarkerShape::Circle,
            *COLOR_TEMPERATURE,
        ),
        scatter(
            dataset.rainfall(),
            measured,
            COLUMN_RAINFALL,
            COLUMN_MOSQUITOS,
            MarkerShape::Square,
            *COLOR_RAINFALL,
        ),
    ];
    figure
}

// src/plot_functions/plot_diagnostics.rs
