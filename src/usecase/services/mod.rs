pub mod grouper;
pub mod mutation;
pub mod query_formatter;
pub mod review_queue;
pub mod review_service;
pub mod table_store;
