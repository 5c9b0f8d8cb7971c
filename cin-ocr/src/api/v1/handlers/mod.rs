pub mod extractions;
pub(crate) mod health;

pub use health::health_check;
