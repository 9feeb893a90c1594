use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum QueryError {
    #[error("Invalid argument [{parameter}]: a client name is required")]
    InvalidArgument {
        parameter: &'static str
    },
    #[error("Numeric overflow occurred while computing [{operation}]")]
    Overflow {
        operation: &'static str
    }
}

impl QueryError {
    pub fn invalid_argument(parameter: &'static str) -> Self {
        Self::InvalidArgument { parameter }
    }

    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}
