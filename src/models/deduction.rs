//! Deduction definitions applied during payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a deduction's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// `value` is a percentage of basic salary (e.g., 8 for 8%).
    Percentage,
    /// `value` is a fixed amount.
    Fixed,
}

/// A configured payroll deduction.
///
/// # Example
///
/// ```
/// use hris_engine::models::{DeductionKind, DeductionType};
/// use rust_decimal::Decimal;
///
/// let epf = DeductionType {
///     id: "epf-default".to_string(),
///     name: "EPF (Employee Provident Fund)".to_string(),
///     kind: DeductionKind::Percentage,
///     value: Decimal::from(8),
///     is_default: true,
///     is_active: true,
/// };
/// assert!(epf.is_default);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionType {
    /// Unique identifier for the deduction.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Percentage or fixed amount.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Percentage points or fixed amount, depending on `kind`.
    pub value: Decimal,
    /// Default deductions cannot be removed.
    pub is_default: bool,
    /// Inactive deductions are ignored by payroll.
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Payload for adding a deduction; the store assigns the id.
///
/// Added deductions are never defaults, so the payload has no default flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeduction {
    /// Display name.
    pub name: String,
    /// Percentage or fixed amount.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Percentage points or fixed amount.
    pub value: Decimal,
    /// Whether payroll applies the deduction.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewDeduction {
    /// Builds the deduction with the given id.
    pub fn into_deduction(self, id: String) -> DeductionType {
        DeductionType {
            id,
            name: self.name,
            kind: self.kind,
            value: self.value,
            is_default: false,
            is_active: self.is_active,
        }
    }
}

/// Partial update for a deduction. The default flag is fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New kind.
    #[serde(default, rename = "type")]
    pub kind: Option<DeductionKind>,
    /// New value.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl crate::store::Record for DeductionType {
    const ENTITY: &'static str = "Deduction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl crate::store::Patch<DeductionType> for DeductionPatch {
    fn apply(self, deduction: &mut DeductionType) {
        if let Some(v) = self.name {
            deduction.name = v;
        }
        if let Some(v) = self.kind {
            deduction.kind = v;
        }
        if let Some(v) = self.value {
            deduction.value = v;
        }
        if let Some(v) = self.is_active {
            deduction.is_active = v;
        }
    }
}
