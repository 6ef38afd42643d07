//! Concrete query node implementations
//!
//! This module provides implementations of the `QueryNode` trait for
//! each primitive a condition can compile into.

mod bitemporal_query;
mod constant_score;
mod geo_query;
mod phrase_query;
mod prefix_query;
mod range_query;
mod regexp_query;
mod term_query;
mod wildcard_query;

pub use bitemporal_query::BiTemporalQuery;
pub use constant_score::ConstantScoreQuery;
pub use geo_query::IntersectsPrefixTreeFilter;
pub use phrase_query::PhraseQuery;
pub use prefix_query::PrefixQuery;
pub use range_query::{NumericRangeQuery, TermRangeQuery};
pub use regexp_query::RegexpQuery;
pub use term_query::TermQuery;
pub use wildcard_query::WildcardQuery;
