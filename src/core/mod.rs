pub mod accessors;
pub mod aggregate;
pub mod query_builder;
pub mod table;
pub mod validation;
