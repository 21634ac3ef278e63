pub mod detection;
pub mod draw;
pub mod utils;

pub use detection::{expected_payoff, probability_none_detected};
pub use draw::{expected_marked_drawn, DrawTable};
