//! Persistence for the campus companion: typed records, a small query
//! contract and interchangeable JSONL / SQLite backends.

pub mod error;
pub mod factory;
pub mod identity;
pub mod migrate;
pub mod query;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use query::Filter;
pub use query::Order;
pub use query::Query;
pub use records::Record;
pub use store::RecordStore;
pub use store::RecordStoreExt;
