//! Domain observation type shared by the dataset, calibration, and wire
//! layers.

use serde::{Deserialize, Serialize};

use crate::grpc;

/// One environmental observation.
///
/// CO and SO2 are optional because replay datasets do not always carry the
/// gas columns. On the wire (gRPC and registry upload) absent values encode
/// as 0.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub co: Option<f64>,
    pub so2: Option<f64>,
}

impl Observation {
    pub fn new(temperature: f64, pressure: f64, humidity: f64) -> Self {
        Self {
            temperature,
            pressure,
            humidity,
            co: None,
            so2: None,
        }
    }

    /// Whether the observation carries any signal at all.
    ///
    /// A peer that has not produced real data yet reports all-zero fields;
    /// calibrating against it would drag readings toward zero, so such
    /// observations are skipped.
    pub fn has_signal(&self) -> bool {
        self.temperature != 0.0
            || self.pressure != 0.0
            || self.humidity != 0.0
            || self.co.is_some_and(|v| v != 0.0)
            || self.so2.is_some_and(|v| v != 0.0)
    }
}

impl From<Observation> for grpc::Reading {
    fn from(obs: Observation) -> Self {
        grpc::Reading {
            temperature: obs.temperature,
            pressure: obs.pressure,
            humidity: obs.humidity,
            co: obs.co.unwrap_or_default(),
            so2: obs.so2.unwrap_or_default(),
        }
    }
}

impl From<grpc::Reading> for Observation {
    fn from(reading: grpc::Reading) -> Self {
        // The proto carries all five fields, so gas values arrive as
        // present (possibly zero) on this side.
        Observation {
            temperature: reading.temperature,
            pressure: reading.pressure,
            humidity: reading.humidity,
            co: Some(reading.co),
            so2: Some(reading.so2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_signal_all_zero() {
        let obs = Observation::default();
        assert!(!obs.has_signal());
    }

    #[test]
    fn test_has_signal_zero_gases() {
        let obs = Observation {
            co: Some(0.0),
            so2: Some(0.0),
            ..Default::default()
        };
        assert!(!obs.has_signal());
    }

    #[test]
    fn test_has_signal_any_field() {
        let obs = Observation {
            humidity: 41.5,
            ..Default::default()
        };
        assert!(obs.has_signal());

        let obs = Observation {
            so2: Some(0.003),
            ..Default::default()
        };
        assert!(obs.has_signal());
    }

    #[test]
    fn test_proto_round_trip_with_gases() {
        let obs = Observation {
            temperature: 21.4,
            pressure: 1013.2,
            humidity: 55.0,
            co: Some(0.4),
            so2: Some(0.02),
        };
        let wire: grpc::Reading = obs.into();
        assert_eq!(wire.co, 0.4);

        let back: Observation = wire.into();
        assert_eq!(back, obs);
    }

    #[test]
    fn test_absent_gases_encode_as_zero() {
        let obs = Observation::new(18.0, 1001.0, 60.0);
        let wire: grpc::Reading = obs.into();
        assert_eq!(wire.co, 0.0);
        assert_eq!(wire.so2, 0.0);
    }
}
