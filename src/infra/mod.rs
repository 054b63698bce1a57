pub mod config;
pub mod db_external;
pub mod disclaimer;
pub mod utils;
