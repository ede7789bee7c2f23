//! Caller-side checks that turn raw form input into ledger commands.
//!
//! The ledger trusts its commands; these drafts are where bad input is
//! rejected, with a message fit for a user-facing notification.

use chrono::NaiveDate;

use gigledger_core::{CompanyId, DomainError, DomainResult, Money};

use crate::command::{AddCompany, AddDelivery, AddFuelRecord, LedgerCommand};
use crate::company::{Color, Company};
use crate::state::LedgerState;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a form accepts for a rate or a fill-up.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000);

fn required<'a>(value: &'a str, field: &str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn positive_money(value: &str, field: &str) -> DomainResult<Money> {
    let amount: Money = required(value, field)?.parse()?;
    if !amount.is_positive() {
        return Err(DomainError::validation(format!("{field} must be positive")));
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::validation(format!("{field} must be at most {MAX_AMOUNT}")));
    }
    Ok(amount)
}

pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    let text = required(value, "date")?;
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| DomainError::validation(format!("date must be YYYY-MM-DD, got {text:?}")))
}

/// Company form: name, per-delivery rate and color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDraft {
    pub name: String,
    pub rate: String,
    pub color: String,
}

impl CompanyDraft {
    /// Prefill the form from an existing company, for editing.
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            rate: company.rate.to_string(),
            color: company.color.to_string(),
        }
    }

    fn validated(&self) -> DomainResult<(String, Money, Color)> {
        let name = required(&self.name, "name")?.to_string();
        let rate = positive_money(&self.rate, "rate per delivery")?;
        let color = if self.color.trim().is_empty() {
            Color::default()
        } else {
            self.color.parse()?
        };
        Ok((name, rate, color))
    }

    pub fn to_add_command(&self) -> DomainResult<LedgerCommand> {
        let (name, rate, color) = self.validated()?;
        Ok(LedgerCommand::AddCompany(AddCompany { name, rate, color }))
    }

    /// Build an `UpdateCompany` for `company_id`, keeping its delivery count.
    pub fn to_update_command(&self, state: &LedgerState, company_id: CompanyId) -> DomainResult<LedgerCommand> {
        let existing = state
            .company(company_id)
            .ok_or_else(|| DomainError::not_found(format!("company {company_id}")))?;
        let (name, rate, color) = self.validated()?;
        Ok(LedgerCommand::UpdateCompany(Company {
            name,
            rate,
            color,
            ..existing.clone()
        }))
    }
}

/// Delivery form: selected company, number of deliveries and day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDraft {
    pub company_id: Option<CompanyId>,
    pub deliveries: String,
    pub date: String,
}

impl DeliveryDraft {
    /// Charges the selected company's current rate.
    pub fn to_command(&self, state: &LedgerState) -> DomainResult<LedgerCommand> {
        let company_id = self
            .company_id
            .ok_or_else(|| DomainError::validation("company is required"))?;
        let count_text = required(&self.deliveries, "number of deliveries")?;
        let date = parse_date(&self.date)?;

        let deliveries: u32 = count_text
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| DomainError::validation("number of deliveries must be a positive whole number"))?;

        let company = state
            .company(company_id)
            .ok_or_else(|| DomainError::not_found(format!("company {company_id}")))?;

        Ok(LedgerCommand::AddDelivery(AddDelivery {
            company_id,
            deliveries,
            rate: company.rate,
            date,
        }))
    }
}

/// Fuel form: amount paid, odometer reading and day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelDraft {
    pub amount: String,
    pub odometer: String,
    pub date: String,
}

impl FuelDraft {
    pub fn to_command(&self) -> DomainResult<LedgerCommand> {
        let amount = positive_money(&self.amount, "amount")?;

        let odometer_km: f64 = required(&self.odometer, "odometer")?
            .replace(',', ".")
            .parse()
            .map_err(|_| DomainError::validation("odometer must be a number"))?;
        if !(odometer_km.is_finite() && odometer_km > 0.0) {
            return Err(DomainError::validation("odometer must be positive"));
        }

        let date = parse_date(&self.date)?;

        Ok(LedgerCommand::AddFuelRecord(AddFuelRecord {
            amount,
            odometer_km,
            date,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LedgerSettings;

    fn validation_message(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn company_draft_builds_add_command() {
        let draft = CompanyDraft {
            name: "  Loggi ".to_string(),
            rate: "9,50".to_string(),
            color: "#10b981".to_string(),
        };
        let LedgerCommand::AddCompany(cmd) = draft.to_add_command().unwrap() else {
            panic!("expected AddCompany");
        };
        assert_eq!(cmd.name, "Loggi");
        assert_eq!(cmd.rate, Money::from_cents(950));
        assert_eq!(cmd.color.as_str(), "#10B981");
    }

    #[test]
    fn company_draft_rejects_bad_input() {
        let base = CompanyDraft {
            name: "Loggi".to_string(),
            rate: "9.50".to_string(),
            color: String::new(),
        };

        let empty_name = CompanyDraft { name: " ".to_string(), ..base.clone() };
        assert_eq!(validation_message(empty_name.to_add_command().unwrap_err()), "name is required");

        let zero_rate = CompanyDraft { rate: "0".to_string(), ..base.clone() };
        assert_eq!(
            validation_message(zero_rate.to_add_command().unwrap_err()),
            "rate per delivery must be positive"
        );

        let text_rate = CompanyDraft { rate: "nine".to_string(), ..base.clone() };
        assert!(text_rate.to_add_command().is_err());

        let bad_color = CompanyDraft { color: "blue".to_string(), ..base.clone() };
        assert!(bad_color.to_add_command().is_err());

        let three_decimals = CompanyDraft { rate: "9.505".to_string(), ..base.clone() };
        assert!(
            validation_message(three_decimals.to_add_command().unwrap_err()).contains("more than two decimal places")
        );

        let huge_rate = CompanyDraft { rate: "50000000000000000".to_string(), ..base };
        assert_eq!(
            validation_message(huge_rate.to_add_command().unwrap_err()),
            "rate per delivery must be at most 1000000.00"
        );
    }

    #[test]
    fn huge_amounts_never_overflow_the_ledger() {
        use crate::session::Session;

        let mut session = Session::default();
        let ifood = session.state().companies()[0].clone();
        let mut rich = ifood.clone();
        rich.rate = Money::from_cents(i64::MAX / 2);
        session.dispatch(LedgerCommand::UpdateCompany(rich));

        let draft = DeliveryDraft {
            company_id: Some(ifood.id),
            deliveries: "3000000000".to_string(),
            date: "2024-06-10".to_string(),
        };
        for _ in 0..2 {
            let command = draft.to_command(session.state()).unwrap();
            session.dispatch(command);
        }

        let state = session.state();
        assert_eq!(state.totals().total_earnings, Money::from_cents(i64::MAX));
        assert_eq!(state.company(ifood.id).unwrap().total_deliveries, 6_000_000_000);

        let report = session.report(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(report.today.deliveries, 6_000_000_000);
        assert_eq!(report.by_company[0].deliveries, 6_000_000_000);
    }

    #[test]
    fn update_command_keeps_id_and_count() {
        let state = LedgerState::seeded(LedgerSettings::default());
        let ifood = state.companies()[0].clone();

        let mut draft = CompanyDraft::from_company(&ifood);
        draft.rate = "10.00".to_string();

        let LedgerCommand::UpdateCompany(updated) = draft.to_update_command(&state, ifood.id).unwrap() else {
            panic!("expected UpdateCompany");
        };
        assert_eq!(updated.id, ifood.id);
        assert_eq!(updated.name, "iFood");
        assert_eq!(updated.rate, Money::from_cents(1000));
        assert_eq!(updated.total_deliveries, ifood.total_deliveries);

        let missing = draft.to_update_command(&state, CompanyId::new()).unwrap_err();
        assert!(matches!(missing, DomainError::NotFound(_)));
    }

    #[test]
    fn delivery_draft_uses_company_rate() {
        let state = LedgerState::seeded(LedgerSettings::default());
        let uber = state.companies()[1].clone();
        let draft = DeliveryDraft {
            company_id: Some(uber.id),
            deliveries: "12".to_string(),
            date: "2024-06-10".to_string(),
        };

        let LedgerCommand::AddDelivery(cmd) = draft.to_command(&state).unwrap() else {
            panic!("expected AddDelivery");
        };
        assert_eq!(cmd.rate, uber.rate);
        assert_eq!(cmd.deliveries, 12);
        assert_eq!(cmd.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    }

    #[test]
    fn delivery_draft_rejects_missing_or_non_positive_fields() {
        let state = LedgerState::seeded(LedgerSettings::default());
        let company_id = Some(state.companies()[0].id);
        let ok = DeliveryDraft {
            company_id,
            deliveries: "3".to_string(),
            date: "2024-06-10".to_string(),
        };

        let cases = [
            DeliveryDraft { company_id: None, ..ok.clone() },
            DeliveryDraft { deliveries: String::new(), ..ok.clone() },
            DeliveryDraft { deliveries: "0".to_string(), ..ok.clone() },
            DeliveryDraft { deliveries: "-2".to_string(), ..ok.clone() },
            DeliveryDraft { deliveries: "2.5".to_string(), ..ok.clone() },
            DeliveryDraft { date: "10/06/2024".to_string(), ..ok.clone() },
        ];
        for draft in cases {
            assert!(
                matches!(draft.to_command(&state), Err(DomainError::Validation(_))),
                "{draft:?} should be rejected"
            );
        }

        let unknown = DeliveryDraft { company_id: Some(CompanyId::new()), ..ok };
        assert!(matches!(unknown.to_command(&state), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn fuel_draft_validates_amount_and_odometer() {
        let ok = FuelDraft {
            amount: "50.00".to_string(),
            odometer: "15000,5".to_string(),
            date: "2024-06-10".to_string(),
        };
        let LedgerCommand::AddFuelRecord(cmd) = ok.to_command().unwrap() else {
            panic!("expected AddFuelRecord");
        };
        assert_eq!(cmd.amount, Money::from_cents(5000));
        assert_eq!(cmd.odometer_km, 15000.5);

        let zero_amount = FuelDraft { amount: "0".to_string(), ..ok.clone() };
        assert_eq!(validation_message(zero_amount.to_command().unwrap_err()), "amount must be positive");

        let bad_km = FuelDraft { odometer: "abc".to_string(), ..ok.clone() };
        assert_eq!(validation_message(bad_km.to_command().unwrap_err()), "odometer must be a number");

        let negative_km = FuelDraft { odometer: "-3".to_string(), ..ok };
        assert_eq!(validation_message(negative_km.to_command().unwrap_err()), "odometer must be positive");
    }
}
