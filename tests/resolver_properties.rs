// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end properties of the command resolution engine.

use irclimate_lib::{
    ClimateState, DeviceProfile, HvacMode, PowerState, Precision, ResolveError, ResolveRequest,
    TemperatureUnit,
    resolver::resolve,
    temperature::convert,
};

fn celsius_state(profile: &DeviceProfile) -> ClimateState {
    ClimateState::initial(profile, TemperatureUnit::Celsius).unwrap()
}

#[test]
fn conversion_round_trips_within_tolerance() {
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
            for t in [-10.0, 0.0, 16.0, 21.5, 30.0, 295.15] {
                let back = convert(convert(t, from, to, None).unwrap(), to, from, None).unwrap();
                assert!((back - t).abs() < 1e-6, "{t} {from}->{to}->{from} = {back}");
            }
        }
    }
}

#[test]
fn idempotent_off_transmits_nothing() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool"],
            "commands": {"on": "TOGGLE", "off": "TOGGLE", "cool": {"20": "C20"}}
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);
    assert_eq!(current.power, PowerState::Off);

    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new().with_power(PowerState::Off),
        TemperatureUnit::Celsius,
    )
    .unwrap();

    assert!(resolution.codes.is_empty());
    assert_eq!(resolution.state.power, PowerState::Off);
    assert_eq!(resolution.state.hvac_mode, current.hvac_mode);
}

#[test]
fn closest_match_prefers_smaller_distance() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 22,
            "operationModes": ["cool"],
            "commands": {
                "off": "OFF",
                "cool": {"16": "C16", "18": "C18", "20": "C20", "22": "C22"}
            }
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    // 19.4 is strictly closer to 20 than to 18
    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Cool)
            .with_target_temperature(19.4),
        TemperatureUnit::Celsius,
    )
    .unwrap();
    assert_eq!(resolution.codes, ["C20"]);
    assert!((resolution.state.target_temperature - 20.0).abs() < f64::EPSILON);

    // an exact tie resolves to the first key in declaration order
    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Cool)
            .with_target_temperature(19.0),
        TemperatureUnit::Celsius,
    )
    .unwrap();
    assert_eq!(resolution.codes, ["C18"]);
}

#[test]
fn wildcard_wins_over_specific_key() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool"],
            "fanModes": ["low", "high"],
            "commands": {
                "off": "OFF",
                "cool": {
                    "low": {"20": "LOW20"},
                    "-": {"20": "ANY20"}
                }
            }
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Cool)
            .with_fan_mode("low")
            .with_target_temperature(20.0),
        TemperatureUnit::Celsius,
    )
    .unwrap();
    assert_eq!(resolution.codes, ["ANY20"]);
    // the wildcard keeps the prior fan mode rather than claiming "low"
    assert_eq!(resolution.state.fan_mode, current.fan_mode);
}

#[test]
fn failed_fan_dimension_returns_no_codes_at_all() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool"],
            "fanModes": ["low", "high"],
            "commands": {
                "off": "OFF",
                "on": "ON",
                "cool": {"unlisted": {"20": "X"}}
            }
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    let err = resolve(
        &profile,
        &current,
        &ResolveRequest::new().with_hvac_mode(HvacMode::Cool),
        TemperatureUnit::Celsius,
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::MissingCommand { .. }));
}

#[test]
fn preset_capability_gating_is_silent() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool"],
            "commands": {"off": "OFF", "cool": {"20": "C20"}}
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Cool)
            .with_preset_mode("sleep"),
        TemperatureUnit::Celsius,
    )
    .unwrap();
    assert_eq!(resolution.codes, ["C20"]);
    assert!(resolution.state.preset_mode.is_none());
}

#[test]
fn power_on_cool_to_21_resolves_prefix_and_closest_key() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool", "heat"],
            "commands": {
                "off": "CODE_OFF",
                "on": "CODE_ON",
                "cool": {"20": "CODE_COOL_20", "22": "CODE_COOL_22"}
            }
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_power(PowerState::On)
            .with_hvac_mode(HvacMode::Cool)
            .with_target_temperature(21.0),
        TemperatureUnit::Celsius,
    )
    .unwrap();

    assert_eq!(resolution.codes, ["CODE_ON", "CODE_COOL_20"]);
    assert!((resolution.state.target_temperature - 20.0).abs() < f64::EPSILON);
}

#[test]
fn fahrenheit_native_device_with_celsius_host() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "F",
            "precision": 1,
            "minTemperature": 60,
            "maxTemperature": 86,
            "operationModes": ["heat"],
            "commands": {
                "off": "OFF",
                "heat": {"68": "F68", "70": "F70", "72": "F72"}
            }
        }"#,
    )
    .unwrap();
    assert_eq!(profile.host_step(TemperatureUnit::Celsius), Precision::Half);

    let current = celsius_state(&profile);
    // 21 C = 69.8 F, closest key is 70; 70 F = 21.1 C rounded at halves -> 21
    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Heat)
            .with_target_temperature(21.0),
        TemperatureUnit::Celsius,
    )
    .unwrap();
    assert_eq!(resolution.codes, ["F70"]);
    assert!((resolution.state.target_temperature - 21.0).abs() < f64::EPSILON);
}

#[test]
fn deep_tree_with_all_dimensions() {
    let profile = DeviceProfile::from_json(
        r#"{
            "temperatureUnit": "C",
            "precision": 1,
            "minTemperature": 16,
            "maxTemperature": 30,
            "operationModes": ["cool"],
            "presetModes": ["none", "eco"],
            "fanModes": ["low", "high"],
            "swingModes": ["off", "on"],
            "commands": {
                "off": "OFF",
                "cool": {
                    "eco": {
                        "high": {
                            "on": {"21": "DEEP"}
                        }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    let current = celsius_state(&profile);

    let resolution = resolve(
        &profile,
        &current,
        &ResolveRequest::new()
            .with_hvac_mode(HvacMode::Cool)
            .with_preset_mode("eco")
            .with_fan_mode("high")
            .with_swing_mode("on")
            .with_target_temperature(21.0),
        TemperatureUnit::Celsius,
    )
    .unwrap();

    assert_eq!(resolution.codes, ["DEEP"]);
    assert_eq!(resolution.state.preset_mode.as_deref(), Some("eco"));
    assert_eq!(resolution.state.fan_mode.as_deref(), Some("high"));
    assert_eq!(resolution.state.swing_mode.as_deref(), Some("on"));
}
