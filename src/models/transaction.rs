use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::ComplianceIssue;
use crate::types::{Age, IssueId, TransactionNumber};

/// Represents a single entry of the input dataset.
///
/// A transaction is a read-only value object: it is fully built when the dataset is
/// parsed and never modified afterwards. The compliance state is folded into
/// [`ComplianceIssue`] so a record either has no issue or an issue with a definite
/// solved/unsolved status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TransactionRecord")]
pub struct Transaction {
    transaction_number: TransactionNumber,
    amount: Decimal,
    sender_full_name: String,
    beneficiary_full_name: String,
    beneficiary_age: Age,
    issue: Option<ComplianceIssue>,
    issue_message: Option<String>
}

impl Transaction {
    pub fn transaction_number(&self) -> TransactionNumber {
        self.transaction_number
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn sender_full_name(&self) -> &str {
        &self.sender_full_name
    }

    pub fn beneficiary_full_name(&self) -> &str {
        &self.beneficiary_full_name
    }

    pub fn beneficiary_age(&self) -> Age {
        self.beneficiary_age
    }

    pub fn issue_id(&self) -> Option<IssueId> {
        self.issue.map(|issue| issue.id)
    }

    pub fn issue_message(&self) -> Option<&str> {
        self.issue_message.as_deref()
    }

    /// An issue is open when it was raised and has not been solved yet.
    pub fn has_open_issue(&self) -> bool {
        self.issue.is_some_and(|issue| !issue.solved)
    }

    pub fn has_solved_issue(&self) -> bool {
        self.issue.is_some_and(|issue| issue.solved)
    }

    /// Whether the client took part in this transaction, either as sender or as beneficiary.
    pub fn involves(&self, client_full_name: &str) -> bool {
        self.sender_full_name == client_full_name || self.beneficiary_full_name == client_full_name
    }
}

#[cfg(test)]
impl Transaction {
    pub fn new(
        transaction_number: TransactionNumber,
        amount: Decimal,
        sender_full_name: impl Into<String>,
        beneficiary_full_name: impl Into<String>,
        beneficiary_age: Age
    ) -> Self {
        Self {
            transaction_number,
            amount,
            sender_full_name: sender_full_name.into(),
            beneficiary_full_name: beneficiary_full_name.into(),
            beneficiary_age,
            issue: None,
            issue_message: None
        }
    }

    pub fn with_issue(mut self, id: IssueId, solved: bool) -> Self {
        self.issue = Some(ComplianceIssue { id, solved });
        self
    }

    pub fn with_issue_message(mut self, message: impl Into<String>) -> Self {
        self.issue_message = Some(message.into());
        self
    }

    pub fn issue(&self) -> Option<ComplianceIssue> {
        self.issue
    }
}

/// JSON shape of a dataset entry.
///
/// Amounts keep every digit of the source number, they never pass through `f64`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    mtn: TransactionNumber,
    amount: Decimal,
    sender_full_name: String,
    beneficiary_full_name: String,
    beneficiary_age: Age,
    #[serde(default)]
    issue_id: Option<IssueId>,
    #[serde(default)]
    issue_solved: Option<bool>,
    #[serde(default)]
    issue_message: Option<String>
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        //NOTE: `issueSolved` only carries meaning next to an `issueId`, a missing flag counts as unsolved
        let issue = record.issue_id.map(|id| ComplianceIssue {
            id,
            solved: record.issue_solved.unwrap_or(false)
        });

        Self {
            transaction_number: record.mtn,
            amount: record.amount,
            sender_full_name: record.sender_full_name,
            beneficiary_full_name: record.beneficiary_full_name,
            beneficiary_age: record.beneficiary_age,
            issue,
            issue_message: record.issue_message
        }
    }
}

/// CSV shape of a dataset entry.
///
/// The csv reader infers numeric cells as `f64`, so the amount is read from the raw cell text instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CsvTransactionRecord {
    mtn: TransactionNumber,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    sender_full_name: String,
    beneficiary_full_name: String,
    beneficiary_age: Age,
    #[serde(default)]
    issue_id: Option<IssueId>,
    #[serde(default)]
    issue_solved: Option<bool>,
    #[serde(default)]
    issue_message: Option<String>
}

impl From<CsvTransactionRecord> for Transaction {
    fn from(record: CsvTransactionRecord) -> Self {
        TransactionRecord {
            mtn: record.mtn,
            amount: record.amount,
            sender_full_name: record.sender_full_name,
            beneficiary_full_name: record.beneficiary_full_name,
            beneficiary_age: record.beneficiary_age,
            issue_id: record.issue_id,
            issue_solved: record.issue_solved,
            issue_message: record.issue_message
        }.into()
    }
}
