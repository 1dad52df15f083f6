//! Command implementations.

pub mod ingest;
pub mod schema;

pub use self::ingest::{execute_ingest, run_ingest};
pub use self::schema::execute_schema;
