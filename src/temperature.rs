// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature unit conversion.
//!
//! The single source of truth for every unit translation in the library:
//! device bounds, target temperatures and command-table temperature keys all
//! go through [`convert`]. The functions here are deterministic and free of
//! side effects.

use crate::error::ValueError;
use crate::types::{Precision, TemperatureUnit};

/// Converts a temperature between units, optionally rounding the result.
///
/// Uses the exact physical transforms (`F = C * 9/5 + 32`,
/// `K = C + 273.15`, composed for Fahrenheit ↔ Kelvin). When `from` and `to`
/// are equal the value passes through unconverted. Rounding is applied only
/// when a precision is given; without one the raw converted value is
/// returned.
///
/// # Examples
///
/// ```
/// use irclimate_lib::{temperature::convert, Precision, TemperatureUnit};
///
/// let f = convert(20.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit, None).unwrap();
/// assert_eq!(f, 68.0);
///
/// let rounded = convert(
///     21.0,
///     TemperatureUnit::Fahrenheit,
///     TemperatureUnit::Celsius,
///     Some(Precision::Half),
/// )
/// .unwrap();
/// assert_eq!(rounded, -6.0);
/// ```
///
/// # Errors
///
/// Returns [`ValueError::InvalidTemperature`] if `value` is not a finite
/// number.
pub fn convert(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
    precision: Option<Precision>,
) -> Result<f64, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::InvalidTemperature(value.to_string()));
    }

    let converted = if from == to {
        value
    } else {
        let celsius = match from {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - 273.15,
        };
        match to {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    };

    Ok(match precision {
        Some(precision) => precision.round(converted),
        None => converted,
    })
}

/// Maps a device's native temperature step to the step exposed in the host
/// unit.
///
/// Crossing between the Celsius/Kelvin family and Fahrenheit changes the
/// degree size, so the granularity the host should offer differs from the
/// device's own. This is a fixed case table, not interpolation:
///
/// | native step | C/K → F | F → C/K |
/// |-------------|---------|---------|
/// | tenth       | half    | tenth   |
/// | half        | whole   | tenth   |
/// | whole       | double  | half    |
/// | double      | double  | whole   |
///
/// Within the same family the native step is kept as-is.
#[must_use]
pub fn host_step(
    native_step: Precision,
    native_unit: TemperatureUnit,
    host_unit: TemperatureUnit,
) -> Precision {
    if native_unit.is_metric() == host_unit.is_metric() {
        native_step
    } else if native_unit.is_metric() {
        match native_step {
            Precision::Tenth => Precision::Half,
            Precision::Half => Precision::Whole,
            Precision::Whole | Precision::Step(_) => Precision::DOUBLE,
        }
    } else {
        match native_step {
            Precision::Step(step) if (step - 2.0).abs() < 1e-9 => Precision::Whole,
            Precision::Whole => Precision::Half,
            _ => Precision::Tenth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn celsius_to_fahrenheit() {
        let f = convert(0.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit, None).unwrap();
        assert!((f - 32.0).abs() < TOLERANCE);
        let f = convert(100.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit, None).unwrap();
        assert!((f - 212.0).abs() < TOLERANCE);
    }

    #[test]
    fn celsius_to_kelvin() {
        let k = convert(20.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin, None).unwrap();
        assert!((k - 293.15).abs() < TOLERANCE);
    }

    #[test]
    fn fahrenheit_to_kelvin_composed() {
        let k = convert(32.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin, None).unwrap();
        assert!((k - 273.15).abs() < TOLERANCE);
    }

    #[test]
    fn same_unit_passes_through() {
        let c = convert(21.37, TemperatureUnit::Celsius, TemperatureUnit::Celsius, None).unwrap();
        assert!((c - 21.37).abs() < TOLERANCE);
    }

    #[test]
    fn round_trip_all_unit_pairs() {
        let units = [
            TemperatureUnit::Celsius,
            TemperatureUnit::Fahrenheit,
            TemperatureUnit::Kelvin,
        ];
        for from in units {
            for to in units {
                if from == to {
                    continue;
                }
                for t in [-40.0, 0.0, 18.5, 21.3, 300.0] {
                    let there = convert(t, from, to, None).unwrap();
                    let back = convert(there, to, from, None).unwrap();
                    assert!(
                        (back - t).abs() < 1e-6,
                        "{t}{from} -> {to} -> {from} came back as {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn rounding_applied_only_with_precision() {
        let raw = convert(70.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius, None).unwrap();
        assert!((raw - 21.111_111_111).abs() < 1e-6);

        let half = convert(
            70.0,
            TemperatureUnit::Fahrenheit,
            TemperatureUnit::Celsius,
            Some(Precision::Half),
        )
        .unwrap();
        assert!((half - 21.0).abs() < TOLERANCE);
    }

    #[test]
    fn non_finite_input_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = convert(value, TemperatureUnit::Celsius, TemperatureUnit::Kelvin, None);
            assert!(matches!(result, Err(ValueError::InvalidTemperature(_))));
        }
    }

    #[test]
    fn host_step_metric_to_fahrenheit() {
        let c = TemperatureUnit::Celsius;
        let f = TemperatureUnit::Fahrenheit;
        assert_eq!(host_step(Precision::Tenth, c, f), Precision::Half);
        assert_eq!(host_step(Precision::Half, c, f), Precision::Whole);
        assert_eq!(host_step(Precision::Whole, c, f), Precision::DOUBLE);
        assert_eq!(host_step(Precision::Step(3.0), c, f), Precision::DOUBLE);
    }

    #[test]
    fn host_step_fahrenheit_to_metric() {
        let f = TemperatureUnit::Fahrenheit;
        let k = TemperatureUnit::Kelvin;
        assert_eq!(host_step(Precision::DOUBLE, f, k), Precision::Whole);
        assert_eq!(host_step(Precision::Whole, f, k), Precision::Half);
        assert_eq!(host_step(Precision::Half, f, k), Precision::Tenth);
        assert_eq!(host_step(Precision::Tenth, f, k), Precision::Tenth);
    }

    #[test]
    fn host_step_same_family_unchanged() {
        let c = TemperatureUnit::Celsius;
        let k = TemperatureUnit::Kelvin;
        assert_eq!(host_step(Precision::Half, c, k), Precision::Half);
        assert_eq!(host_step(Precision::Tenth, c, c), Precision::Tenth);
        let f = TemperatureUnit::Fahrenheit;
        assert_eq!(host_step(Precision::Whole, f, f), Precision::Whole);
    }
}
