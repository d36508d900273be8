// src/converter.rs

use ndarray::Array1;

use crate::errors::{AnalysisError, AnalysisResult};

/// Converts a Fahrenheit value or collection of values to Celsius.
///
/// Scalars map to scalars and containers map elementwise to containers of the
/// same length, each element computed as `(value - 32) * 5 / 9`.
pub trait FahrenheitToCelsius {
    type Output;

    fn to_celsius(&self) -> Self::Output;
}

impl FahrenheitToCelsius for f64 {
    type Output = f64;

    fn to_celsius(&self) -> f64 {
        (self - 32.0) * 5.0 / 9.0
    }
}

impl FahrenheitToCelsius for f32 {
    type Output = f32;

    fn to_celsius(&self) -> f32 {
        (self - 32.0) * 5.0 / 9.0
    }
}

impl<T: FahrenheitToCelsius> FahrenheitToCelsius for [T] {
    type Output = Vec<T::Output>;

    fn to_celsius(&self) -> Self::Output {
        self.iter().map(FahrenheitToCelsius::to_celsius).collect()
    }
}

impl<T: FahrenheitToCelsius> FahrenheitToCelsius for Vec<T> {
    type Output = Vec<T::Output>;

    fn to_celsius(&self) -> Self::Output {
        self.as_slice().to_celsius()
    }
}

impl<T: FahrenheitToCelsius, const N: usize> FahrenheitToCelsius for [T; N] {
    type Output = [T::Output; N];

    fn to_celsius(&self) -> Self::Output {
        std::array::from_fn(|i| self[i].to_celsius())
    }
}

impl FahrenheitToCelsius for Array1<f64> {
    type Output = Array1<f64>;

    fn to_celsius(&self) -> Array1<f64> {
        self.mapv(|f| f.to_celsius())
    }
}

impl FahrenheitToCelsius for Array1<f32> {
    type Output = Array1<f32>;

    fn to_celsius(&self) -> Array1<f32> {
        self.mapv(|f| f.to_celsius())
    }
}

/// Convert temperature(s) in Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius<T>(temp: &T) -> T::Output
where
    T: FahrenheitToCelsius + ?Sized,
{
    temp.to_celsius()
}

/// Inverse of [`fahrenheit_to_celsius`] for a single value.
pub fn celsius_to_fahrenheit(temp: f64) -> f64 {
    temp * 9.0 / 5.0 + 32.0
}

/// Parses a textual Fahrenheit reading.
pub fn parse_fahrenheit(text: &str) -> AnalysisResult<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
        .ok_or_else(|| AnalysisError::NonNumeric {
            input: trimmed.to_string(),
        })
}

/// Parses a textual Fahrenheit reading and converts it to Celsius.
pub fn fahrenheit_text_to_celsius(text: &str) -> AnalysisResult<f64> {
    parse_fahrenheit(text).map(|f| f.to_celsius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_reference_points() {
        assert!(fahrenheit_to_celsius(&32.0_f64).abs() < TOLERANCE);
        assert!((fahrenheit_to_celsius(&212.0_f64) - 100.0).abs() < TOLERANCE);
        assert!((fahrenheit_to_celsius(&-40.0_f64) + 40.0).abs() < TOLERANCE);
        assert!((fahrenheit_to_celsius(&98.6f32) - 37.0).abs() < 1e-4);
    }

    #[test]
    fn test_elementwise_matches_scalar() {
        let readings: Vec<f64> = vec![-40.0, 0.0, 32.0, 70.5, 212.0];
        let converted = fahrenheit_to_celsius(&readings);
        assert_eq!(converted.len(), readings.len());
        for (f, c) in readings.iter().zip(&converted) {
            assert!((c - (f - 32.0) * 5.0 / 9.0).abs() < TOLERANCE);
        }

        let fixed = fahrenheit_to_celsius(&[32.0_f64, 212.0]);
        assert!(fixed[0].abs() < TOLERANCE);
        assert!((fixed[1] - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_array_conversion_keeps_shape() {
        let readings: Array1<f64> = Array1::from(vec![50.0, 68.0, 86.0]);
        let converted = fahrenheit_to_celsius(&readings);
        assert_eq!(converted.len(), 3);
        assert!((converted[0] - 10.0).abs() < TOLERANCE);
        assert!((converted[1] - 20.0).abs() < TOLERANCE);
        assert!((converted[2] - 30.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_round_trip_through_inverse() {
        for f in [-459.67_f64, -40.0, 0.0, 451.0] {
            let back = celsius_to_fahrenheit(fahrenheit_to_celsius(&f));
            assert!((back - f).abs() < 1e-9, "{f} came back as {back}");
        }
    }

    #[test]
    fn test_text_input() {
        assert!((fahrenheit_text_to_celsius(" 212 ").unwrap() - 100.0).abs() < TOLERANCE);

        let err = fahrenheit_text_to_celsius("warm").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(parse_fahrenheit("NaN").is_err());
        assert!(parse_fahrenheit("").is_err());
    }
}
