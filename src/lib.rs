pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod pipeline;

pub use config::Config;
pub use error::AppError;
pub use pipeline::WeeklyDigest;
