//! Core expense domain types and the rules an expense must follow.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// The reasons an expense can fail validation.
///
/// The messages are sent to the client as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The amount was zero, negative or not a number.
    #[error("amount must be greater than zero")]
    AmountNotPositive,

    /// The title was an empty string.
    #[error("empty title")]
    EmptyTitle,
}

/// A record of money spent.
///
/// Serializes to `{"id":1,"amount":75,"title":"...","note":"...","tags":[...]}`
/// with the keys in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// How much was spent, always greater than zero.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    /// A short description, never empty.
    pub title: String,
    /// Free-form details about the expense.
    pub note: String,
    /// Labels for grouping expenses, in the order the client gave them.
    pub tags: Vec<String>,
}

impl Expense {
    /// Check the expense against the expense rules.
    ///
    /// Only the first broken rule is reported and the amount is checked
    /// before the title.
    ///
    /// # Errors
    ///
    /// Returns [ValidationError::AmountNotPositive] if the amount is not
    /// greater than zero, or [ValidationError::EmptyTitle] if the title is
    /// empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(self.amount, &self.title)
    }
}

/// The fields a client sends to create or update an expense.
///
/// Missing fields take their zero value, `"tags": null` is read as no tags and
/// an `"id"` key is ignored. Fields with the wrong type fail deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseData {
    /// How much was spent.
    pub amount: f64,
    /// A short description.
    pub title: String,
    /// Free-form details.
    pub note: String,
    /// Labels for grouping expenses.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl ExpenseData {
    /// Check the data against the expense rules, see [Expense::validate].
    ///
    /// # Errors
    ///
    /// Returns the first [ValidationError] that applies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(self.amount, &self.title)
    }

    /// Create the expense with `id` that holds this data.
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            amount: self.amount,
            title: self.title,
            note: self.note,
            tags: self.tags,
        }
    }
}

fn validate_fields(amount: f64, title: &str) -> Result<(), ValidationError> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }

    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    Ok(())
}

/// The largest integer below which every integer is exactly representable as an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole amounts without a fractional part, e.g. `15` instead of `15.0`.
fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
