//! Cross-calibration of observations
//!
//! Two nearby sensors should agree on what they measure; each node nudges
//! its raw observation toward its neighbor's by taking the field-wise mean.
//! Gas fields participate only when both sides carry them.

use aeris_api::Observation;
use tracing::debug;

/// Calibrate `own` against `neighbor`, averaging each field.
pub fn calibrate(own: &Observation, neighbor: &Observation) -> Observation {
    let mut calibrated = *own;

    calibrated.temperature = mean_of("Temperature", own.temperature, neighbor.temperature);
    calibrated.humidity = mean_of("Humidity", own.humidity, neighbor.humidity);
    calibrated.pressure = mean_of("Pressure", own.pressure, neighbor.pressure);

    if let (Some(a), Some(b)) = (own.co, neighbor.co) {
        calibrated.co = Some(mean_of("CO", a, b));
    }
    if let (Some(a), Some(b)) = (own.so2, neighbor.so2) {
        calibrated.so2 = Some(mean_of("SO2", a, b));
    }

    calibrated
}

fn mean_of(field: &str, own: f64, neighbor: f64) -> f64 {
    let avg = (own + neighbor) / 2.0;
    debug!(
        "Calibrating {}: own={}, neighbor={} -> avg={}",
        field, own, neighbor, avg
    );
    avg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrate_averages_fields() {
        let own = Observation {
            temperature: 20.0,
            pressure: 1000.0,
            humidity: 40.0,
            co: Some(0.4),
            so2: Some(0.02),
        };
        let neighbor = Observation {
            temperature: 22.0,
            pressure: 1010.0,
            humidity: 60.0,
            co: Some(0.6),
            so2: Some(0.04),
        };

        let result = calibrate(&own, &neighbor);
        assert_eq!(result.temperature, 21.0);
        assert_eq!(result.pressure, 1005.0);
        assert_eq!(result.humidity, 50.0);
        assert_eq!(result.co, Some(0.5));
        assert_eq!(result.so2, Some(0.03));
    }

    #[test]
    fn test_gas_fields_skip_when_own_absent() {
        let own = Observation::new(20.0, 1000.0, 40.0);
        let neighbor = Observation {
            temperature: 22.0,
            pressure: 1010.0,
            humidity: 60.0,
            co: Some(0.6),
            so2: Some(0.04),
        };

        let result = calibrate(&own, &neighbor);
        assert_eq!(result.temperature, 21.0);
        // No own gas data, nothing to average against
        assert_eq!(result.co, None);
        assert_eq!(result.so2, None);
    }

    #[test]
    fn test_gas_fields_keep_own_when_neighbor_absent() {
        let own = Observation {
            co: Some(0.4),
            ..Observation::new(20.0, 1000.0, 40.0)
        };
        let neighbor = Observation::new(22.0, 1010.0, 60.0);

        let result = calibrate(&own, &neighbor);
        assert_eq!(result.co, Some(0.4));
    }

    #[test]
    fn test_calibrate_is_symmetric_on_shared_fields() {
        let a = Observation::new(18.0, 990.0, 35.0);
        let b = Observation::new(24.0, 1020.0, 65.0);

        let ab = calibrate(&a, &b);
        let ba = calibrate(&b, &a);
        assert_eq!(ab.temperature, ba.temperature);
        assert_eq!(ab.pressure, ba.pressure);
        assert_eq!(ab.humidity, ba.humidity);
    }
}
