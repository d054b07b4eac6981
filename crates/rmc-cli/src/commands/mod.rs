pub mod correct;
pub mod log;
pub mod recipes;
pub mod tare;
pub mod weigh;
