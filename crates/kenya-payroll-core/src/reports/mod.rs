pub mod statistics;
pub mod trends;
