// ABOUTME: CompanyRecord and its nested entities, the sole output of the extraction pipeline.
// ABOUTME: Scalars are optional, collections are owned vectors that default to empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A person listed in the company's leadership.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LeadershipProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// One technology observed in the company's stack.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TechStackItem {
    pub company_name: Option<String>,
    pub tech_name: Option<String>,
}

/// A news or media mention.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NewsItem {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Normalized company profile extracted from one page.
///
/// Built once per fetched page and never mutated afterwards. Unknown scalars
/// are `None` (zero is a real value); unknown collections are empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CompanyRecord {
    pub url: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub revenue: Option<f64>,
    pub revenue_currency: Option<String>,
    pub stock_symbol: Option<String>,
    pub website: Option<String>,
    pub employees: Option<i64>,
    pub industry: Vec<String>,
    pub headquarters: Option<String>,
    pub phone_number: Option<String>,
    pub total_funding_amount: Option<f64>,
    pub most_recent_funding_amount: Option<f64>,
    pub funding_currency: Option<String>,
    pub funding_rounds: Option<i64>,
    pub leadership: Vec<LeadershipProfile>,
    pub popular_searches: Vec<String>,
    pub business_classification_codes: Vec<String>,
    pub total_employees: Option<i64>,
    pub c_level_employees: Option<i64>,
    pub vp_level_employees: Option<i64>,
    pub director_level_employees: Option<i64>,
    pub manager_level_employees: Option<i64>,
    pub non_manager_employees: Option<i64>,
    pub top_contacts: Option<i64>,
    pub org_chart: Vec<Map<String, Value>>,
    pub social_media: Vec<String>,
    pub ceo_rating: Option<f64>,
    pub enps_score: Option<f64>,
    pub similar_companies: Vec<String>,
    pub email_formats: Vec<String>,
    pub products_owned: Vec<String>,
    pub tech_stack: Vec<TechStackItem>,
    pub recent_scoops: Vec<Map<String, Value>>,
    pub news_and_media: Vec<NewsItem>,
}

impl CompanyRecord {
    /// A record carrying only the source URL, every other field unknown.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Returns true if nothing beyond the URL was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty(self.url.clone())
    }
}
