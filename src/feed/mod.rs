//! Boundary between the mobile client's attendance feed and the engine.

pub mod board;
pub mod consumer;
pub mod normalize;
pub mod raw;

pub use board::{ApplyOutcome, FeedUpdate, SessionBoard};
pub use consumer::{ConsumerStats, FeedSender, run_consumer};
pub use normalize::{FeedError, normalize};
