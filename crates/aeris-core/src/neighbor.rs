//! Neighbor identity
//!
//! The registry answers nearest-neighbor lookups with a sensor summary
//! that may be the asking node itself; such answers mean "no neighbor".

use aeris_api::SensorSummary;

/// The peer a node calibrates against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub id: i64,
    pub ip: String,
    pub port: u16,
}

impl Neighbor {
    /// Build a neighbor from a registry nearest-response, discarding the
    /// node's own registration.
    pub fn from_summary(summary: &SensorSummary, own_id: i64) -> Option<Self> {
        if summary.id == own_id {
            return None;
        }
        Some(Self {
            id: summary.id,
            ip: summary.ip.clone(),
            port: summary.port,
        })
    }
}

impl std::fmt::Display for Neighbor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "id={}, addr={}:{}", self.id, self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64) -> SensorSummary {
        SensorSummary {
            id,
            ip: "10.0.0.9".to_string(),
            port: 50051,
            latitude: 45.77,
            longitude: 15.93,
        }
    }

    #[test]
    fn test_from_summary() {
        let neighbor = Neighbor::from_summary(&summary(4), 1).unwrap();
        assert_eq!(neighbor.id, 4);
        assert_eq!(neighbor.ip, "10.0.0.9");
        assert_eq!(neighbor.port, 50051);
    }

    #[test]
    fn test_own_registration_is_not_a_neighbor() {
        assert!(Neighbor::from_summary(&summary(1), 1).is_none());
    }

    #[test]
    fn test_display() {
        let neighbor = Neighbor::from_summary(&summary(4), 1).unwrap();
        assert_eq!(neighbor.to_string(), "id=4, addr=10.0.0.9:50051");
    }
}
