/// Transaction number (`mtn`) as carried by the dataset. Not guaranteed unique.
pub type TransactionNumber = i64;
pub type IssueId = i64;
pub type Age = u32;
