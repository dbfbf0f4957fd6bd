use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, as returned by a single provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub condition: String,
    /// When the provider last refreshed this observation, if it said so.
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// Fahrenheit is always derived from `temperature_c`, never stored.
    pub fn temperature_f(&self) -> f64 {
        celsius_to_fahrenheit(self.temperature_c)
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Two decimals, ties rounded away from zero (`33.125` -> `"33.13"`).
pub fn format_two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature_c: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "London".to_string(),
            temperature_c,
            humidity_pct: 65,
            wind_kph: 10.0,
            condition: "Sunny".to_string(),
            observed_at: None,
        }
    }

    #[test]
    fn converts_reference_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(celsius_to_fahrenheit(20.0), 68.0);
    }

    #[test]
    fn fahrenheit_tracks_celsius() {
        let mut s = snapshot(20.0);
        assert_eq!(s.temperature_f(), 68.0);

        s.temperature_c = 37.0;
        assert!((s.temperature_f() - 98.6).abs() < 1e-9);
    }

    #[test]
    fn two_decimal_formatting_matches_rounding() {
        for c in [-12.3, 0.1, 15.55, 21.7, 33.33, 0.625, -0.625, 1.875] {
            let expected = ((c * 9.0 / 5.0 + 32.0) * 100.0_f64).round() / 100.0;
            let shown: f64 = format_two_decimals(celsius_to_fahrenheit(c)).parse().unwrap();
            assert!((shown - expected).abs() < 1e-9, "c = {c}");
        }
    }

    #[test]
    fn exact_ties_round_up() {
        // 0.625 C is exactly 33.125 F.
        assert_eq!(format_two_decimals(celsius_to_fahrenheit(0.625)), "33.13");
        assert_eq!(format_two_decimals(celsius_to_fahrenheit(1.875)), "35.38");
        assert_eq!(format_two_decimals(20.0), "20.00");
    }
}
