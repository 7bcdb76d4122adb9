pub mod espn;
pub mod pfr;
