use serde::{Deserialize, Serialize};

use gigledger_core::Money;

use crate::delivery::Delivery;
use crate::fuel::FuelRecord;

/// Aggregate figures derived from the full record sets.
///
/// Always computed wholesale with [`DerivedTotals::compute`], never patched
/// incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedTotals {
    pub total_earnings: Money,
    pub total_fuel_cost: Money,
    pub net_profit: Money,
}

impl DerivedTotals {
    pub fn compute(deliveries: &[Delivery], fuel_records: &[FuelRecord]) -> Self {
        let total_earnings: Money = deliveries.iter().map(|d| d.total).sum();
        let total_fuel_cost: Money = fuel_records.iter().map(|r| r.amount).sum();
        Self {
            total_earnings,
            total_fuel_cost,
            net_profit: total_earnings - total_fuel_cost,
        }
    }
}
