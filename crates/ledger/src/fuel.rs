use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gigledger_core::{Entity, FuelRecordId, Money};

/// Assumed pump price per liter used to estimate the volume of a fill-up.
pub const DEFAULT_FUEL_PRICE: Money = Money::from_cents(550);

/// Consumption figures derived from two consecutive fill-ups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelEfficiency {
    pub distance_km: f64,
    pub liters: f64,
    pub km_per_liter: f64,
    pub cost_per_km: f64,
}

impl FuelEfficiency {
    /// Efficiency of the fill-up at `current_km`, relative to the fill-up at
    /// `previous_km`.
    ///
    /// `None` unless every derived figure is finite and positive: zero or
    /// negative distance, a zero amount or a zero price yield no efficiency.
    pub fn between(previous_km: f64, current_km: f64, amount: Money, price_per_liter: Money) -> Option<Self> {
        if !amount.is_positive() || !price_per_liter.is_positive() {
            return None;
        }

        let distance_km = current_km - previous_km;
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return None;
        }

        let liters = amount.as_f64() / price_per_liter.as_f64();
        let km_per_liter = distance_km / liters;
        let cost_per_km = amount.as_f64() / distance_km;

        [liters, km_per_liter, cost_per_km]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            .then_some(Self {
                distance_km,
                liters,
                km_per_liter,
                cost_per_km,
            })
    }
}

/// One refueling event with the odometer reading at the pump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub id: FuelRecordId,
    pub amount: Money,
    pub odometer_km: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<FuelEfficiency>,
}

impl Entity for FuelRecord {
    type Id = FuelRecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The fill-up preceding a reading of `odometer_km`: the record with the
/// highest reading strictly below it. Dates play no part.
pub fn previous_fill_up(records: &[FuelRecord], odometer_km: f64) -> Option<&FuelRecord> {
    records
        .iter()
        .filter(|r| r.odometer_km < odometer_km)
        .max_by(|a, b| a.odometer_km.total_cmp(&b.odometer_km))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount_cents: i64, km: f64) -> FuelRecord {
        FuelRecord {
            id: FuelRecordId::new(),
            amount: Money::from_cents(amount_cents),
            odometer_km: km,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            efficiency: None,
        }
    }

    #[test]
    fn efficiency_uses_price_to_estimate_liters() {
        let eff = FuelEfficiency::between(1000.0, 1300.0, Money::from_cents(5500), DEFAULT_FUEL_PRICE).unwrap();
        assert_eq!(eff.distance_km, 300.0);
        assert!((eff.liters - 10.0).abs() < 1e-9);
        assert!((eff.km_per_liter - 30.0).abs() < 1e-9);
        assert!((eff.cost_per_km - 55.0 / 300.0).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_or_amount_has_no_efficiency() {
        assert_eq!(FuelEfficiency::between(1000.0, 1000.0, Money::from_cents(5000), DEFAULT_FUEL_PRICE), None);
        assert_eq!(FuelEfficiency::between(1000.0, 1200.0, Money::ZERO, DEFAULT_FUEL_PRICE), None);
        assert_eq!(FuelEfficiency::between(1000.0, 1200.0, Money::from_cents(5000), Money::ZERO), None);
        assert_eq!(FuelEfficiency::between(1000.0, f64::INFINITY, Money::from_cents(5000), DEFAULT_FUEL_PRICE), None);
    }

    #[test]
    fn previous_fill_up_picks_nearest_lower_reading() {
        let records = vec![record(5000, 1000.0), record(5000, 2000.0), record(5000, 1500.0)];
        let prev = previous_fill_up(&records, 1800.0).unwrap();
        assert_eq!(prev.odometer_km, 1500.0);
        assert_eq!(previous_fill_up(&records, 2500.0).unwrap().odometer_km, 2000.0);
    }

    #[test]
    fn equal_reading_is_not_a_predecessor() {
        let records = vec![record(5000, 1000.0)];
        assert!(previous_fill_up(&records, 1000.0).is_none());
        assert!(previous_fill_up(&records, 999.0).is_none());
    }
}
