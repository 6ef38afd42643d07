//! Abstract Syntax Tree for compiled queries
//!
//! This module defines the `QueryNode` trait every query primitive implements
//! and the closed `Query` enum a condition compiles into.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use super::context::QueryContext;
use super::nodes::{
    BiTemporalQuery, ConstantScoreQuery, IntersectsPrefixTreeFilter, NumericRangeQuery,
    PhraseQuery, PrefixQuery, RegexpQuery, TermQuery, TermRangeQuery, WildcardQuery,
};
use crate::models::Document;
use crate::Result;

/// Core trait for all query nodes
///
/// A node decides whether a document matches and how much a match scores.
/// Scoring is constant: a matching document scores the node's boost.
pub trait QueryNode: Send + Sync + Debug {
    /// Check whether a document matches
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool>;

    /// Get the query type name for debugging and logging
    fn query_type(&self) -> &'static str;

    /// Get the boost factor for this query
    fn boost(&self) -> f32 {
        1.0
    }

    /// Score of a document, or `None` if it does not match
    fn score(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<Option<f32>> {
        Ok(self.matches(ctx, doc)?.then(|| self.boost()))
    }
}

/// Render a boost the way query descriptions show it, omitted when neutral
pub(crate) fn boost_suffix(boost: f32) -> String {
    if boost == 1.0 {
        String::new()
    } else {
        format!("^{:?}", boost)
    }
}

/// A query that matches no documents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchNoneQuery {
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl Default for MatchNoneQuery {
    fn default() -> Self {
        Self { boost: 1.0 }
    }
}

impl QueryNode for MatchNoneQuery {
    fn matches(&self, _ctx: &QueryContext<'_>, _doc: &Document) -> Result<bool> {
        Ok(false)
    }

    fn query_type(&self) -> &'static str {
        "match_none"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for MatchNoneQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchNoDocsQuery{}", boost_suffix(self.boost))
    }
}

/// A compiled query
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    Term(TermQuery),
    Phrase(PhraseQuery),
    NumericRange(NumericRangeQuery),
    TermRange(TermRangeQuery),
    Regexp(RegexpQuery),
    Wildcard(WildcardQuery),
    Prefix(PrefixQuery),
    ConstantScore(ConstantScoreQuery),
    IntersectsPrefixTree(IntersectsPrefixTreeFilter),
    BiTemporal(BiTemporalQuery),
    MatchNone(MatchNoneQuery),
}

impl Query {
    fn node(&self) -> &dyn QueryNode {
        match self {
            Query::Term(q) => q,
            Query::Phrase(q) => q,
            Query::NumericRange(q) => q,
            Query::TermRange(q) => q,
            Query::Regexp(q) => q,
            Query::Wildcard(q) => q,
            Query::Prefix(q) => q,
            Query::ConstantScore(q) => q,
            Query::IntersectsPrefixTree(q) => q,
            Query::BiTemporal(q) => q,
            Query::MatchNone(q) => q,
        }
    }

    /// Set the boost factor
    ///
    /// A bare filter carries no boost of its own, so boosting one wraps it in
    /// a constant score query.
    pub fn with_boost(self, boost: f32) -> Self {
        match self {
            Query::Term(q) => Query::Term(q.with_boost(boost)),
            Query::Phrase(q) => Query::Phrase(q.with_boost(boost)),
            Query::NumericRange(q) => Query::NumericRange(q.with_boost(boost)),
            Query::TermRange(q) => Query::TermRange(q.with_boost(boost)),
            Query::Regexp(q) => Query::Regexp(q.with_boost(boost)),
            Query::Wildcard(q) => Query::Wildcard(q.with_boost(boost)),
            Query::Prefix(q) => Query::Prefix(q.with_boost(boost)),
            Query::ConstantScore(q) => Query::ConstantScore(q.with_boost(boost)),
            Query::BiTemporal(q) => Query::BiTemporal(q.with_boost(boost)),
            Query::MatchNone(_) => Query::MatchNone(MatchNoneQuery { boost }),
            filter @ Query::IntersectsPrefixTree(_) => {
                Query::ConstantScore(ConstantScoreQuery::new(filter).with_boost(boost))
            }
        }
    }

    /// Field the query targets, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Query::Term(q) => Some(&q.field),
            Query::Phrase(q) => Some(&q.field),
            Query::NumericRange(q) => Some(&q.field),
            Query::TermRange(q) => Some(&q.field),
            Query::Regexp(q) => Some(&q.field),
            Query::Wildcard(q) => Some(&q.field),
            Query::Prefix(q) => Some(&q.field),
            Query::ConstantScore(q) => q.filter.field(),
            Query::IntersectsPrefixTree(q) => Some(&q.field),
            Query::BiTemporal(q) => Some(&q.field),
            Query::MatchNone(_) => None,
        }
    }
}

impl QueryNode for Query {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        self.node().matches(ctx, doc)
    }

    fn query_type(&self) -> &'static str {
        self.node().query_type()
    }

    fn boost(&self) -> f32 {
        self.node().boost()
    }

    fn score(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<Option<f32>> {
        self.node().score(ctx, doc)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(q) => write!(f, "{}", q),
            Query::Phrase(q) => write!(f, "{}", q),
            Query::NumericRange(q) => write!(f, "{}", q),
            Query::TermRange(q) => write!(f, "{}", q),
            Query::Regexp(q) => write!(f, "{}", q),
            Query::Wildcard(q) => write!(f, "{}", q),
            Query::Prefix(q) => write!(f, "{}", q),
            Query::ConstantScore(q) => write!(f, "{}", q),
            Query::IntersectsPrefixTree(q) => write!(f, "{}", q),
            Query::BiTemporal(q) => write!(f, "{}", q),
            Query::MatchNone(q) => write!(f, "{}", q),
        }
    }
}
