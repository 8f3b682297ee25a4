// Business domains
pub mod counting;
