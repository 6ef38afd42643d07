//! Compiled queries and their reference execution
//!
//! Conditions compile into the closed `Query` enum. Each variant wraps a node
//! implementing `QueryNode`, which a `QueryExecutor` can evaluate against
//! in-memory documents:
//! - Term, phrase and prefix queries over analyzed terms
//! - Numeric and term range queries
//! - Regexp and wildcard pattern queries
//! - Geo prefix tree filters and bitemporal interval queries
//! - Constant score wrappers and the empty query

pub mod ast;
pub mod context;
pub mod executor;
pub mod nodes;
pub mod types;

pub use ast::{MatchNoneQuery, Query, QueryNode};
pub use context::QueryContext;
pub use executor::{QueryExecutor, QueryResult, QueryStats};
pub use nodes::{
    BiTemporalQuery, ConstantScoreQuery, IntersectsPrefixTreeFilter, NumericRangeQuery,
    PhraseQuery, PrefixQuery, RegexpQuery, TermQuery, TermRangeQuery, WildcardQuery,
};
pub use types::{BiTemporalOperation, ScoredDoc};
