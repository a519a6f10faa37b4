//! Match feature-extraction and expected-goals estimation engine.
//!
//! Gathers independently-fallible signals about two competing teams (recent
//! form, expected goals, head-to-head history, venue advantage, injuries,
//! betting-market drift, weather) and fuses them into one [`MatchFeatures`]
//! bundle plus a bounded data-quality score. Downstream prediction and
//! calibration layers consume the bundle; serialization and transport are
//! their concern, not this crate's.

pub mod error;
pub mod extract;
pub mod fallback;
pub mod form;
pub mod head_to_head;
pub mod injury;
pub mod market;
pub mod quality;
pub mod sources;
pub mod types;
pub mod venue;
pub mod weather;
pub mod xg;

pub use error::ExtractError;
pub use extract::FeatureExtractor;
pub use sources::{FixtureLookup, SignalStore};
pub use types::MatchFeatures;
