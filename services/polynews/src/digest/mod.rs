//! Digest composition
//!
//! 1. `item`: scored articles and the group map curators supply
//! 2. `grouper`: turn items + groups into an ordered rendering plan
//! 3. `highlight`: mark percentage figures in item text
//! 4. `render`: newsletter HTML for a plan

pub mod grouper;
pub mod highlight;
pub mod item;
pub mod render;

pub use grouper::{compose, compose_with_title, RenderBlock, HIGH_SIGNAL_THRESHOLD, OTHER_STORIES};
pub use highlight::{annotate, highlight_html, percent_spans, ItemHighlights};
pub use item::{load_groups, load_items, GroupMap, ScoredItem};
pub use render::{format_digest_date, render_articles, render_newsletter, write_digest_html};
