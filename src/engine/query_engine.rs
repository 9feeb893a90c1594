use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::convert::Infallible;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::engine::QueryError;
use crate::models::Transaction;
use crate::types::IssueId;

const TOP_TRANSACTIONS: usize = 3;

/// Answers analytical queries over an immutable, already loaded set of transactions.
///
/// The records are shared behind an `Arc`, so cloning the engine is cheap and every clone
/// can be queried from its own thread. No query changes the record set.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    transactions: Arc<[Transaction]>
}

impl QueryEngine {
    /// Creates a new engine over the given records, keeping their order.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        debug!("Query engine created over {} transactions", transactions.len());

        Self {
            transactions: transactions.into()
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transaction amounts, zero when there are no transactions.
    ///
    /// # Errors
    /// Returns `QueryError::Overflow` if the sum exceeds the `Decimal` range.
    pub fn total_amount(&self) -> Result<Decimal, QueryError> {
        sum_amounts(self.transactions.iter(), "total_amount")
    }

    /// Sum of the amounts sent by the given client, zero when the client sent nothing.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidArgument` if the name is empty, or
    /// `QueryError::Overflow` if the sum exceeds the `Decimal` range.
    pub fn total_amount_sent_by(&self, sender_full_name: &str) -> Result<Decimal, QueryError> {
        let sender_full_name = require_name(sender_full_name, "sender_full_name")?;

        let sent = self.transactions.iter()
            .filter(|transaction| transaction.sender_full_name() == sender_full_name);

        sum_amounts(sent, "total_amount_sent_by")
    }

    /// Highest transaction amount, `None` when there is no data.
    pub fn max_amount(&self) -> Option<Decimal> {
        self.transactions.iter().map(Transaction::amount).max()
    }

    /// Number of distinct clients, counting every name that appears as sender or as beneficiary.
    pub fn count_unique_clients(&self) -> usize {
        self.transactions.iter()
            .flat_map(|transaction| [transaction.sender_full_name(), transaction.beneficiary_full_name()])
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct sender names only.
    pub fn count_unique_senders(&self) -> usize {
        self.transactions.iter()
            .map(Transaction::sender_full_name)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether the client, as sender or beneficiary, has at least one transaction with an open compliance issue.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidArgument` if the name is empty.
    pub fn has_open_compliance_issue(&self, client_full_name: &str) -> Result<bool, QueryError> {
        let client_full_name = require_name(client_full_name, "client_full_name")?;

        let open = self.transactions.iter()
            .any(|transaction| transaction.involves(client_full_name) && transaction.has_open_issue());

        trace!("Client [{client_full_name}] has open compliance issue: {open}");

        Ok(open)
    }

    /// Index of transactions by beneficiary name.
    ///
    /// The index is lossy: when several transactions share a beneficiary, the last one in input
    /// order wins. Use [`QueryEngine::transactions_grouped_by_beneficiary`] to keep all of them.
    pub fn transactions_by_beneficiary(&self) -> BTreeMap<&str, &Transaction> {
        self.transactions.iter()
            .map(|transaction| (transaction.beneficiary_full_name(), transaction))
            .collect()
    }

    /// All transactions per beneficiary name, each group in input order.
    pub fn transactions_grouped_by_beneficiary(&self) -> BTreeMap<&str, Vec<&Transaction>> {
        let mut groups = BTreeMap::<&str, Vec<&Transaction>>::new();

        for transaction in self.transactions.iter() {
            groups.entry(transaction.beneficiary_full_name()).or_default().push(transaction);
        }

        groups
    }

    /// Identifiers of all open compliance issues.
    pub fn unsolved_issue_ids(&self) -> BTreeSet<IssueId> {
        self.transactions.iter()
            .filter(|transaction| transaction.has_open_issue())
            .filter_map(Transaction::issue_id)
            .collect()
    }

    /// Messages attached to solved compliance issues, in input order.
    ///
    /// Solved issues without a message contribute nothing.
    pub fn solved_issue_messages(&self) -> Vec<&str> {
        self.transactions.iter()
            .filter(|transaction| transaction.has_solved_issue())
            .filter_map(Transaction::issue_message)
            .collect()
    }

    /// The three transactions with the highest amount, highest first.
    pub fn top3_by_amount(&self) -> Vec<&Transaction> {
        self.top_by_amount(TOP_TRANSACTIONS)
    }

    /// The `count` transactions with the highest amount, highest first.
    ///
    /// Equal amounts keep their input order.
    pub fn top_by_amount(&self, count: usize) -> Vec<&Transaction> {
        let mut ranked: Vec<&Transaction> = self.transactions.iter().collect();

        // Stable sort, ties stay in input order
        ranked.sort_by(|left, right| right.amount().cmp(&left.amount()));
        ranked.truncate(count);

        ranked
    }

    /// Sender appearing in the most transactions.
    ///
    /// Ties go to the sender encountered first. `None` when there are no transactions.
    pub fn top_sender_by_frequency(&self) -> Option<&str> {
        // A count can never exceed the number of records
        let Ok(top) = self.top_sender_by(|_| 1usize, |total: usize, count: usize| Ok::<_, Infallible>(total + count));

        top
    }

    /// Sender with the largest total amount sent.
    ///
    /// Ties go to the sender encountered first. `None` when there are no transactions.
    ///
    /// # Errors
    /// Returns `QueryError::Overflow` if a sender's total exceeds the `Decimal` range.
    pub fn top_sender_by_total_amount(&self) -> Result<Option<&str>, QueryError> {
        self.top_sender_by(Transaction::amount, |total: Decimal, amount: Decimal| {
            total.checked_add(amount).ok_or_else(|| QueryError::overflow("top_sender_by_total_amount"))
        })
    }

    fn top_sender_by<T, E, W, A>(&self, weight: W, add: A) -> Result<Option<&str>, E>
    where
        T: Default + Ord + Copy,
        W: Fn(&Transaction) -> T,
        A: Fn(T, T) -> Result<T, E>
    {
        let mut positions = HashMap::<&str, usize>::new();
        let mut totals = Vec::<(&str, T)>::new();

        for transaction in self.transactions.iter() {
            let sender = transaction.sender_full_name();
            let position = *positions.entry(sender).or_insert_with(|| {
                totals.push((sender, T::default()));
                totals.len() - 1
            });

            totals[position].1 = add(totals[position].1, weight(transaction))?;
        }

        let mut top: Option<(&str, T)> = None;

        for (sender, total) in totals {
            if top.is_none_or(|(_, best)| total > best) {
                top = Some((sender, total));
            }
        }

        Ok(top.map(|(sender, _)| sender))
    }
}

fn sum_amounts<'a>(
    mut transactions: impl Iterator<Item = &'a Transaction>,
    operation: &'static str
) -> Result<Decimal, QueryError> {
    transactions.try_fold(Decimal::ZERO, |total, transaction| {
        total.checked_add(transaction.amount()).ok_or_else(|| QueryError::overflow(operation))
    })
}

fn require_name<'a>(name: &'a str, parameter: &'static str) -> Result<&'a str, QueryError> {
    if name.is_empty() {
        return Err(QueryError::invalid_argument(parameter));
    }

    Ok(name)
}
