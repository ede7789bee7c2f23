use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gigledger_core::{CompanyId, DomainError, Entity, Money, ValueObject};

/// Colors offered when registering a company.
pub const COLOR_PALETTE: [&str; 8] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
];

/// Display color of a company, always `#RRGGBB` in uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl ValueObject for Color {}

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The palette as parsed colors.
    pub fn palette() -> Vec<Color> {
        COLOR_PALETTE.iter().map(|c| Color((*c).to_string())).collect()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color(COLOR_PALETTE[0].to_string())
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let hex = text
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| DomainError::validation(format!("color must be #RRGGBB, got {s:?}")))?;
        Ok(Color(format!("#{}", hex.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

/// A delivery-platform partner paying a fixed rate per delivery.
///
/// `total_deliveries` is derived from the delivery records referencing this
/// company; the ledger maintains it on every delivery add/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub rate: Money,
    pub total_deliveries: u64,
    pub color: Color,
}

impl Entity for Company {
    type Id = CompanyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Companies present in a freshly seeded ledger.
///
/// Ids are fixed so that scripted sessions can reference them.
pub fn default_companies() -> Vec<Company> {
    [
        (1u128, "iFood", 850, "#EA1D2C"),
        (2, "Uber Eats", 900, "#00A86B"),
        (3, "Rappi", 780, "#FF6600"),
    ]
    .into_iter()
    .map(|(id, name, cents, color)| Company {
        id: CompanyId::from_uuid(Uuid::from_u128(id)),
        name: name.to_string(),
        rate: Money::from_cents(cents),
        total_deliveries: 0,
        color: Color(color.to_string()),
    })
    .collect()
}
