// ABOUTME: The two independent extraction strategies feeding the merge step.
// ABOUTME: JSON-LD organization data and heuristic meta/selector/text scraping.

//! Extraction strategies.
//!
//! - `structured`: JSON-LD organization descriptors (authoritative).
//! - `heuristic`: meta tags, links, selectors and visible text (gap filler).

pub mod heuristic;
pub mod structured;
