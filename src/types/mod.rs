pub mod benchmark;
pub mod config;
pub mod metric;
pub mod score;
