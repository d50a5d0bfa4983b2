// ABOUTME: Library entry point for the company profile extraction core.
// ABOUTME: Re-exports the record types, the parser and the normalization helpers.

//! CompanyScope extraction core.
//!
//! Turns one company-profile HTML page into a [`CompanyRecord`]. JSON-LD
//! organization data wins; heuristic scraping fills whatever it left empty.
//! The core performs no I/O and holds no shared mutable state, so a single
//! [`CompanyParser`] can serve any number of concurrent callers.
//!
//! # Example
//!
//! ```
//! let html = r#"<html><head><meta property="og:title" content="Acme Corp"></head></html>"#;
//! let record = companyscope_extract::extract(html, "https://example.com/company/123456");
//! assert_eq!(record.name.as_deref(), Some("Acme Corp"));
//! assert_eq!(record.id.as_deref(), Some("123456"));
//! ```

pub mod builder;
pub mod error;
pub mod extractors;
pub mod fields;
pub mod normalize;
pub mod parser;
pub mod record;
pub mod select;

pub use crate::builder::{derive_company_id, RecordBuilder};
pub use crate::error::ExtractError;
pub use crate::extractors::heuristic::HeuristicExtractor;
pub use crate::extractors::structured::StructuredExtractor;
pub use crate::fields::{merge, FieldMap};
pub use crate::normalize::{
    clean_text, extract_currency_amount, normalize_list, parse_float_safe, parse_int_safe,
};
pub use crate::parser::{extract, CompanyParser};
pub use crate::record::{CompanyRecord, LeadershipProfile, NewsItem, TechStackItem};
