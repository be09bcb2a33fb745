use serde::{Deserialize, Serialize};

/// The closed set of transaction types the API accepts.
///
/// Rows store the type as a plain string so that records edited out-of-band
/// never make reads fail; aggregation treats anything `parse` rejects as a
/// no-op for summation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
    Cash,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Cash => "cash",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub created_at: String,
}

impl Transaction {
    pub fn kind(&self) -> Option<TransactionType> {
        TransactionType::parse(&self.txn_type)
    }

    /// Plain-text amount for exports: whole units without a trailing ".0".
    pub fn amount_display(&self) -> String {
        format_amount(self.amount)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    pub description: String,
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}
