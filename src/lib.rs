#[cfg(test)]
mod tests;

pub mod aggregator_core;
pub mod config;
pub mod format;
