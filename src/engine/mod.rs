mod errors;
mod query_engine;

pub use errors::QueryError;
pub use query_engine::QueryEngine;
