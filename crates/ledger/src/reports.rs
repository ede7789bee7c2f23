//! Read-side queries behind the dashboard and reports views.
//!
//! Everything here is a pure fold over a [`LedgerState`]; nothing is cached.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use gigledger_core::{CompanyId, Money};

use crate::company::Color;
use crate::delivery::Delivery;
use crate::state::LedgerState;
use crate::totals::DerivedTotals;

/// Deliveries registered on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub earnings: Money,
    pub deliveries: u64,
    pub records: Vec<Delivery>,
}

/// Earnings attributed to one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyEarnings {
    pub company_id: CompanyId,
    pub name: String,
    pub color: Color,
    pub deliveries: u64,
    pub earnings: Money,
}

impl LedgerState {
    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let records: Vec<Delivery> = self
            .deliveries()
            .iter()
            .filter(|d| d.date == date)
            .cloned()
            .collect();

        DaySummary {
            date,
            earnings: records.iter().map(|d| d.total).sum(),
            deliveries: records.iter().map(|d| u64::from(d.deliveries)).sum(),
            records,
        }
    }

    pub fn month_earnings(&self, year: i32, month: u32) -> Money {
        self.deliveries()
            .iter()
            .filter(|d| d.date.year() == year && d.date.month() == month)
            .map(|d| d.total)
            .sum()
    }

    pub fn total_delivery_count(&self) -> u64 {
        self.deliveries().iter().map(|d| u64::from(d.deliveries)).sum()
    }

    /// Mean earnings per delivery, rounded to the cent; zero without deliveries.
    pub fn average_per_delivery(&self) -> Money {
        let count = self.total_delivery_count();
        if count == 0 {
            return Money::ZERO;
        }
        Money::from_f64(self.totals().total_earnings.as_f64() / count as f64).unwrap_or(Money::ZERO)
    }

    /// Up to `limit` deliveries, latest date first. Same-day records keep
    /// their entry order.
    pub fn recent_deliveries(&self, limit: usize) -> Vec<Delivery> {
        let mut recent = self.deliveries().to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }

    /// Per-company earnings, in company registration order.
    pub fn earnings_by_company(&self) -> Vec<CompanyEarnings> {
        self.companies()
            .iter()
            .map(|company| CompanyEarnings {
                company_id: company.id,
                name: company.name.clone(),
                color: company.color.clone(),
                deliveries: company.total_deliveries,
                earnings: self
                    .deliveries()
                    .iter()
                    .filter(|d| d.company_id == company.id)
                    .map(|d| d.total)
                    .sum(),
            })
            .collect()
    }

    /// Mean km/L over fill-ups that have an efficiency; zero when none do.
    pub fn average_efficiency(&self) -> f64 {
        let values: Vec<f64> = self
            .fuel_records()
            .iter()
            .filter_map(|r| r.efficiency.map(|e| e.km_per_liter))
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Snapshot of every dashboard figure for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    pub today: DaySummary,
    pub month_earnings: Money,
    pub totals: DerivedTotals,
    pub total_deliveries: u64,
    pub average_per_delivery: Money,
    pub average_km_per_liter: f64,
    pub recent_deliveries: Vec<Delivery>,
    pub by_company: Vec<CompanyEarnings>,
}

impl LedgerReport {
    pub const RECENT_LIMIT: usize = 3;

    pub fn build(state: &LedgerState, today: NaiveDate) -> Self {
        Self {
            today: state.day_summary(today),
            month_earnings: state.month_earnings(today.year(), today.month()),
            totals: *state.totals(),
            total_deliveries: state.total_delivery_count(),
            average_per_delivery: state.average_per_delivery(),
            average_km_per_liter: state.average_efficiency(),
            recent_deliveries: state.recent_deliveries(Self::RECENT_LIMIT),
            by_company: state.earnings_by_company(),
        }
    }
}
