pub mod availability;
pub mod matching;
pub mod queue;
pub mod scoring;
