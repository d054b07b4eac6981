pub mod engine;
pub mod reading;

pub use engine::correct;
pub use reading::MoistureReading;
