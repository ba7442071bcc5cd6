//! Data Model
//!
//! Expense records and summaries as exchanged with the backend and persisted
//! in the snapshot cache. Decoding is lenient: the backend serializes DECIMAL
//! columns as strings and may send `null` for empty aggregates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Backend-assigned record identifier.
///
/// Compared by its text form, so `7` and `"7"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseId::Number(n) => write!(f, "{}", n),
            ExpenseId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for ExpenseId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ExpenseId {}

impl Hash for ExpenseId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for ExpenseId {
    fn from(id: i64) -> Self {
        ExpenseId::Number(id)
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        match id.parse::<i64>() {
            Ok(n) if n.to_string() == id => ExpenseId::Number(n),
            _ => ExpenseId::Text(id.to_string()),
        }
    }
}

/// Classifier used for aggregation; the amount sign is not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryType {
    Income,
    #[default]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// Anything other than `income` counts as an expense.
    pub fn from_label(label: &str) -> Self {
        if label == "income" {
            EntryType::Income
        } else {
            EntryType::Expense
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EntryType::from_label(s))
    }
}

impl Serialize for EntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(EntryType::from_label(raw.as_deref().unwrap_or_default()))
    }
}

/// A single income or expense transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    /// ISO `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
}

impl Expense {
    /// The `YYYY-MM` prefix of the date, or `None` when the date is empty.
    pub fn month_key(&self) -> Option<&str> {
        if self.date.is_empty() {
            return None;
        }
        let end = self
            .date
            .char_indices()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(self.date.len());
        Some(&self.date[..end])
    }
}

/// Create/update payload: a record without its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Per-category total reported by the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: f64,
}

/// Server-computed totals for the whole record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "lenient_number")]
    pub income: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub expense: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub balance: f64,
    #[serde(rename = "byCategory", default, deserialize_with = "null_as_default")]
    pub by_category: Vec<CategoryTotal>,
}

/// Body returned by create/update; either `{"id": ..}` or the full record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub id: Option<ExpenseId>,
}

/// Numeric value of a loosely typed JSON scalar; non-numeric becomes zero.
pub fn number_from_value(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) if s.trim().is_empty() => Some(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_decimal_strings() {
        let raw = r#"{"id": 3, "title": "Rent", "amount": "1200.50", "date": "2024-04-01",
                      "category": "Housing", "type": "expense"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.amount, 1200.5);
        assert_eq!(expense.id, ExpenseId::from(3));
    }

    #[test]
    fn test_decode_garbage_amount_is_zero() {
        let raw = r#"{"id": "a", "amount": "abc", "type": "refund"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.entry_type, EntryType::Expense);
        assert_eq!(expense.title, "");
        assert_eq!(expense.month_key(), None);
    }

    #[test]
    fn test_id_compares_as_text() {
        assert_eq!(ExpenseId::Number(42), ExpenseId::Text("42".to_string()));
        assert_eq!(ExpenseId::from("42"), ExpenseId::Number(42));
        assert_eq!(ExpenseId::from("007"), ExpenseId::Text("007".to_string()));
    }

    #[test]
    fn test_summary_null_fields() {
        let raw = r#"{"income": null, "expense": "10.25", "balance": -10.25, "byCategory": null}"#;
        let summary: Summary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expense, 10.25);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_input_serializes_type_field() {
        let input = ExpenseInput {
            title: "Salary".to_string(),
            amount: 2000.0,
            date: "2024-03-01".to_string(),
            category: "Work".to_string(),
            entry_type: EntryType::Income,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_month_key() {
        let raw = r#"{"id": 1, "date": "2024-03-02"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.month_key(), Some("2024-03"));
    }
}
