// src/data_input/dataset.rs

use std::collections::BTreeMap;

use crate::constants::{COLUMN_MOSQUITOS, COLUMN_RAINFALL, COLUMN_TEMPERATURE};
use crate::errors::{AnalysisError, AnalysisResult};

/// Name-keyed numeric columns, as handed over by the caller.
///
/// No schema is enforced here; [`Dataset::from_table`] checks the columns the
/// analysis needs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnTable {
    columns: BTreeMap<String, Vec<f64>>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Replaces an existing column with the same name.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Option<Vec<f64>> {
        self.columns.insert(name.into(), values)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<f64>> {
        self.columns.remove(name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for ColumnTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        }
    }
}

/// Validated observations: one row per observation, all columns the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    temperature: Vec<f64>,
    rainfall: Vec<f64>,
    mosquitos: Vec<f64>,
}

impl Dataset {
    /// Builds a dataset, checking that `rainfall` and `mosquitos` match the
    /// length of `temperature` and that every value is finite.
    pub fn new(
        temperature: Vec<f64>,
        rainfall: Vec<f64>,
        mosquitos: Vec<f64>,
    ) -> AnalysisResult<Self> {
        let expected = temperature.len();
        for (column, found) in [
            (COLUMN_RAINFALL, rainfall.len()),
            (COLUMN_MOSQUITOS, mosquitos.len()),
        ] {
            if found != expected {
                return Err(AnalysisError::LengthMismatch {
                    column,
                    expected,
                    found,
                });
            }
        }

        for (column, values) in [
            (COLUMN_TEMPERATURE, &temperature),
            (COLUMN_RAINFALL, &rainfall),
            (COLUMN_MOSQUITOS, &mosquitos),
        ] {
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(AnalysisError::NonFiniteValue { column, row });
            }
        }

        Ok(Self {
            temperature,
            rainfall,
            mosquitos,
        })
    }

    /// Looks up the required columns by name. Extra columns are ignored.
    pub fn from_table(table: &ColumnTable) -> AnalysisResult<Self> {
        let lookup = |name: &'static str| {
            table
                .column(name)
                .map(<[f64]>::to_vec)
                .ok_or(AnalysisError::MissingColumn { name })
        };

        let temperature = lookup(COLUMN_TEMPERATURE)?;
        let rainfall = lookup(COLUMN_RAINFALL)?;
        let mosquitos = lookup(COLUMN_MOSQUITOS)?;
        Self::new(temperature, rainfall, mosquitos)
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn rainfall(&self) -> &[f64] {
        &self.rainfall
    }

    pub fn mosquitos(&self) -> &[f64] {
        &self.mosquitos
    }

    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

impl TryFrom<&ColumnTable> for Dataset {
    type Error = AnalysisError;

    fn try_from(table: &ColumnTable) -> AnalysisResult<Self> {
        Dataset::from_table(table)
    }
}
