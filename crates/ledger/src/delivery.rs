use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gigledger_core::{CompanyId, DeliveryId, Entity, Money};

/// One day's batch of completed deliveries for one company.
///
/// Immutable once recorded. `rate` is the company rate at entry time, so later
/// rate changes do not alter past earnings. The company name is not stored;
/// resolve it through `LedgerState::company_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub company_id: CompanyId,
    pub deliveries: u32,
    pub rate: Money,
    /// `deliveries × rate`.
    pub total: Money,
    pub date: NaiveDate,
}

impl Delivery {
    pub fn new(
        id: DeliveryId,
        company_id: CompanyId,
        deliveries: u32,
        rate: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            company_id,
            deliveries,
            rate,
            total: rate.times(deliveries),
            date,
        }
    }
}

impl Entity for Delivery {
    type Id = DeliveryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_count_times_rate() {
        let delivery = Delivery::new(
            DeliveryId::new(),
            CompanyId::new(),
            10,
            Money::from_cents(850),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(delivery.total, Money::from_cents(8500));
    }

    #[test]
    fn date_serializes_as_iso_day() {
        let delivery = Delivery::new(
            DeliveryId::new(),
            CompanyId::new(),
            1,
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let json = serde_json::to_value(&delivery).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["total"], "1.00");
    }
}
