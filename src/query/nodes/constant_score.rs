//! Constant score query - wraps a filter so every match scores the boost

use crate::models::Document;
use crate::query::ast::{boost_suffix, Query, QueryNode};
use crate::query::context::QueryContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantScoreQuery {
    /// Query deciding which documents match
    pub filter: Box<Query>,
    /// Score of every matching document
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl ConstantScoreQuery {
    pub fn new(filter: Query) -> Self {
        Self {
            filter: Box::new(filter),
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl QueryNode for ConstantScoreQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        self.filter.matches(ctx, doc)
    }

    fn query_type(&self) -> &'static str {
        "constant_score"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for ConstantScoreQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantScore({}){}", self.filter, boost_suffix(self.boost))
    }
}
