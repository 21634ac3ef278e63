pub mod error;
pub mod logging;
pub mod math;
pub mod scenario;
pub mod sweep;

pub use error::{ModelError, Result};
pub use scenario::SweepConfig;
pub use sweep::{argmax, sweep, SweepPoint};
