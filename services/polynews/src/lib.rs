//! Prediction-market news pipeline.
//!
//! Two stages:
//! 1. `markets`: pull events from the gamma API, flatten them into
//!    [`markets::NormalizedMarket`] records and score them for interest.
//! 2. `digest`: group, dedup and order curated items into a rendering plan
//!    and turn that plan into newsletter HTML.

pub mod config;
pub mod digest;
pub mod error;
pub mod markets;
pub mod venue;

pub use error::{PolynewsError, Result};
