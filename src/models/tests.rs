use super::{ComplianceIssue, Transaction};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

#[test]
fn test_transaction_deserializes_all_fields_from_json() -> Result<()> {
    let json = r#"{
        "mtn": 663458,
        "amount": 430.2,
        "senderFullName": "Tom Shelby",
        "beneficiaryFullName": "Alfie Solomons",
        "beneficiaryAge": 33,
        "issueId": 1,
        "issueSolved": false,
        "issueMessage": "Looks like money laundering"
    }"#;

    let transaction: Transaction = serde_json::from_str(json)?;

    assert_eq!(transaction.transaction_number(), 663458);
    assert_eq!(transaction.amount(), Decimal::from_str("430.2")?);
    assert_eq!(transaction.sender_full_name(), "Tom Shelby");
    assert_eq!(transaction.beneficiary_full_name(), "Alfie Solomons");
    assert_eq!(transaction.beneficiary_age(), 33);
    assert_eq!(transaction.issue(), Some(ComplianceIssue { id: 1, solved: false }));
    assert_eq!(transaction.issue_message(), Some("Looks like money laundering"));
    assert!(transaction.has_open_issue());
    assert!(!transaction.has_solved_issue());

    Ok(())
}

#[test]
fn test_missing_issue_solved_flag_counts_as_unsolved() -> Result<()> {
    let json = r#"{"mtn": 1, "amount": 10, "senderFullName": "A", "beneficiaryFullName": "B", "beneficiaryAge": 20, "issueId": 7}"#;

    let transaction: Transaction = serde_json::from_str(json)?;

    assert_eq!(transaction.issue_id(), Some(7));
    assert!(transaction.has_open_issue());

    Ok(())
}

#[test]
fn test_issue_solved_flag_is_ignored_without_issue_id() -> Result<()> {
    let json = r#"{"mtn": 1, "amount": 10, "senderFullName": "A", "beneficiaryFullName": "B", "beneficiaryAge": 20, "issueId": null, "issueSolved": false, "issueMessage": null}"#;

    let transaction: Transaction = serde_json::from_str(json)?;

    assert_eq!(transaction.issue(), None);
    assert!(!transaction.has_open_issue());
    assert!(!transaction.has_solved_issue());
    assert_eq!(transaction.issue_message(), None);

    Ok(())
}

#[test]
fn test_transaction_without_required_field_is_rejected() {
    let json = r#"{"mtn": 1, "senderFullName": "A", "beneficiaryFullName": "B", "beneficiaryAge": 20}"#;

    assert!(serde_json::from_str::<Transaction>(json).is_err());
}

#[test]
fn test_involves_matches_sender_or_beneficiary_case_sensitively() {
    let transaction = Transaction::new(1, Decimal::ONE, "Arthur Shelby", "Grace Burgess", 29);

    assert!(transaction.involves("Arthur Shelby"));
    assert!(transaction.involves("Grace Burgess"));
    assert!(!transaction.involves("arthur shelby"));
    assert!(!transaction.involves("Michael Gray"));
}

#[test]
fn test_builder_attaches_issue_and_message() {
    let transaction = Transaction::new(5, Decimal::TEN, "A", "B", 40)
        .with_issue(3, true)
        .with_issue_message("Never gonna give you up");

    assert_eq!(transaction.issue_id(), Some(3));
    assert!(transaction.has_solved_issue());
    assert_eq!(transaction.issue_message(), Some("Never gonna give you up"));
}
