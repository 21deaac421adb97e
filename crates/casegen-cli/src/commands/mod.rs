pub mod compliance;
pub mod config;
pub mod dispatch;
pub mod generate;
pub mod prompt;
pub mod schema;
pub mod shared;
pub mod split;
