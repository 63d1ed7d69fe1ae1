//! Service implementations

pub mod calculator;

pub use calculator::RealEventCalculator;
