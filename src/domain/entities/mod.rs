pub mod edit;
pub mod review;
pub mod table;
