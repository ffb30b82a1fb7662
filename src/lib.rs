pub mod chart;
pub mod filter;
pub mod layout;
pub mod replay;
pub mod statistic;
pub mod ticks;
