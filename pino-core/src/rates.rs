//! Settlement rates applied by the aggregator.

use serde::{Deserialize, Serialize};

/// Product dust guard: `8.2 * 15.0` is `122.99999999999999` in binary
/// floating point, and a bare floor would drop a decimal-exact fee by a
/// whole yen.
const FEE_DUST: f64 = 1e-9;

/// Reimbursement rates. Passed into the aggregator explicitly so callers
/// (and tests) can vary them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementRates {
    /// Yen per kilometer.
    pub rate_per_km: f64,
    /// Yen per distinct working day.
    pub daily_allowance: i64,
}

impl Default for SettlementRates {
    fn default() -> Self {
        Self {
            rate_per_km: 15.0,
            daily_allowance: 200,
        }
    }
}

impl SettlementRates {
    /// Transportation fee for one day: the distance/rate product, floored.
    /// Flooring (not rounding) is contractual.
    pub fn transportation_fee(&self, total_distance: f64) -> i64 {
        (total_distance * self.rate_per_km + FEE_DUST).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_floors_product() {
        let rates = SettlementRates::default();
        assert_eq!(rates.transportation_fee(10.5), 157); // floor(157.5)
        assert_eq!(rates.transportation_fee(10.0), 150);
        assert_eq!(rates.transportation_fee(0.0), 0);
    }

    #[test]
    fn test_fee_survives_float_dust() {
        let rates = SettlementRates::default();
        // 5.0 + 3.2 sums to 8.2; 8.2 * 15 must floor to 123, not 122.
        assert_eq!(rates.transportation_fee(5.0 + 3.2), 123);
    }

    #[test]
    fn test_custom_rate() {
        let rates = SettlementRates {
            rate_per_km: 20.0,
            daily_allowance: 0,
        };
        assert_eq!(rates.transportation_fee(10.5), 210);
    }
}
