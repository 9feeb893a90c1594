#[cfg(test)]
mod tests;
mod transaction;

use crate::types::IssueId;

pub use transaction::Transaction;
pub(crate) use transaction::CsvTransactionRecord;

/// A compliance issue raised against a transaction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ComplianceIssue {
    pub id: IssueId,
    pub solved: bool
}
