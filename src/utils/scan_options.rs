//! Scan ordering options

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOrder {
    Serial,
    Random,
}

impl Default for ScanOrder {
    fn default() -> Self {
        Self::Serial
    }
}

impl ScanOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "serial" | "seq" | "sequential" => Some(Self::Serial),
            "random" | "rand" | "shuffle" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Apply the configured ordering to a port list
pub fn order_ports(mut ports: Vec<u16>, order: ScanOrder) -> Vec<u16> {
    match order {
        ScanOrder::Serial => ports,
        ScanOrder::Random => {
            ports.shuffle(&mut rand::thread_rng());
            ports
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(ScanOrder::from_str("serial"), Some(ScanOrder::Serial));
        assert_eq!(ScanOrder::from_str("SHUFFLE"), Some(ScanOrder::Random));
        assert_eq!(ScanOrder::from_str("bogus"), None);
    }

    #[test]
    fn test_order_ports_preserves_contents() {
        let ports: Vec<u16> = (6030..6060).collect();

        let serial = order_ports(ports.clone(), ScanOrder::Serial);
        assert_eq!(serial, ports);

        let mut random = order_ports(ports.clone(), ScanOrder::Random);
        random.sort_unstable();
        assert_eq!(random, ports);
    }
}
