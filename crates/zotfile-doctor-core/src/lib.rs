pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod path_set;
pub mod platform;
pub mod progress;
pub mod scanner;
pub mod storage;

pub use config::AppConfig;
pub use engine::{DoctorEngine, DoctorResult};
pub use error::Error;
pub use normalize::{NormalizedPath, PathNormalizer};
pub use path_set::PathSet;
pub use platform::CaseSensitivity;
pub use progress::{ProgressReporter, SilentReporter};
