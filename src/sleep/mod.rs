pub mod calculator;
pub mod time_math;
