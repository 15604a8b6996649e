//! # DEHA-Pose
//!
//! The pose evaluation engine: turns one frame of body landmarks into
//! per-joint correctness, ordered corrections and a smoothed accuracy score.
//!
//! ## Components
//!
//! - **Catalog**: static pose definitions, each an ordered list of joint-angle checks
//! - **Evaluator**: applies one pose's checks to one landmark frame
//! - **Smoother**: trailing-window average of raw scores to damp detector jitter
//! - **Session**: owns the active pose and score history, drives each tick
//!
//! Scores are integers throughout and always rounded down.

pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod session;
pub mod smoother;

pub use catalog::*;
pub use config::*;
pub use evaluator::*;
pub use session::*;
pub use smoother::*;
