//! Market extraction and scoring
//!
//! 1. `raw`: decode gamma events into boundary structs
//! 2. `normalize`: flatten each event into one record with sorted options
//! 3. `scoring`: interest heuristic
//! 4. `collector`: day-by-day sweep over an event source
//! 5. `ranking`: order by interest and export

pub mod collector;
pub mod field;
pub mod normalize;
pub mod ranking;
pub mod raw;
pub mod scoring;

pub use collector::{sweep_windows, MarketCollector, SweepWindow};
pub use field::{extract, extract_or, safe_float, FieldValue, NOT_AVAILABLE};
pub use normalize::{normalize_event, MarketOption, NormalizedMarket, Tag};
pub use ranking::{load_markets_json, rank_by_interest, top_markets, write_markets_json};
pub use raw::{decode_literal_list, RawEvent, RawMarket, RawTag};
pub use scoring::{interest_score, BREAKING_TAG_ID};
