//! Query executor for running compiled queries against documents
//!
//! This is a reference matcher: it evaluates a query node by node against
//! every document of a slice. Document numbers are positions in that slice.

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::debug;

use crate::models::Document;
use crate::query::ast::{Query, QueryNode};
use crate::query::context::QueryContext;
use crate::query::types::ScoredDoc;
use crate::schema::{DocValue, Schema, SortField};
use crate::Result;

/// Query execution statistics
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStats {
    pub docs_scanned: u64,
    pub docs_matched: u64,
    pub execution_time_us: u64,
}

/// Query execution result
#[derive(Debug)]
pub struct QueryResult {
    /// Matching documents, best first
    pub hits: Vec<ScoredDoc>,
    /// Total number of matching documents
    pub total_hits: u64,
    /// Execution statistics
    pub stats: QueryStats,
}

/// Query executor for running queries
pub struct QueryExecutor<'a> {
    ctx: QueryContext<'a>,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            ctx: QueryContext::new(schema),
        }
    }

    /// Document numbers of every matching document
    pub fn execute(&self, query: &Query, docs: &[Document]) -> Result<RoaringBitmap> {
        let mut bitmap = RoaringBitmap::new();
        for (docno, doc) in (0u32..).zip(docs) {
            if query.matches(&self.ctx, doc)? {
                bitmap.insert(docno);
            }
        }
        Ok(bitmap)
    }

    /// Score matching documents and keep the `top_k` best
    ///
    /// Ties keep document order.
    pub fn search(&self, query: &Query, docs: &[Document], top_k: usize) -> Result<QueryResult> {
        let start = Instant::now();
        let mut hits = self.scored(query, docs)?;
        let total_hits = hits.len() as u64;

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.docno.cmp(&b.docno)));
        hits.truncate(top_k);

        let stats = QueryStats {
            docs_scanned: docs.len() as u64,
            docs_matched: total_hits,
            execution_time_us: start.elapsed().as_micros() as u64,
        };
        debug!(
            query_type = query.query_type(),
            docs = docs.len(),
            matched = total_hits,
            "executed query"
        );

        Ok(QueryResult {
            hits,
            total_hits,
            stats,
        })
    }

    /// Matching documents ordered by doc values
    ///
    /// Documents without a value for a sort field come last in either
    /// direction. Multi-valued fields sort by their smallest value.
    pub fn search_sorted(
        &self,
        query: &Query,
        docs: &[Document],
        sort: &[SortField],
    ) -> Result<Vec<ScoredDoc>> {
        let mut hits = self.scored(query, docs)?;
        hits.sort_by(|a, b| {
            let (doc_a, doc_b) = (&docs[a.docno as usize], &docs[b.docno as usize]);
            sort.iter()
                .map(|field| compare_by(field, doc_a, doc_b))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
                .then(a.docno.cmp(&b.docno))
        });
        Ok(hits)
    }

    fn scored(&self, query: &Query, docs: &[Document]) -> Result<Vec<ScoredDoc>> {
        let mut hits = Vec::new();
        for (docno, doc) in (0u32..).zip(docs) {
            if let Some(score) = query.score(&self.ctx, doc)? {
                hits.push(ScoredDoc {
                    docno,
                    id: doc.id,
                    score,
                });
            }
        }
        Ok(hits)
    }
}

fn sort_value<'d>(field: &'d SortField, doc: &'d Document) -> Option<&'d DocValue> {
    doc.doc_values(&field.field).map(|f| &f.value).min()
}

fn compare_by(field: &SortField, a: &Document, b: &Document) -> Ordering {
    match (sort_value(field, a), sort_value(field, b)) {
        (Some(x), Some(y)) if field.reverse => y.cmp(x),
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
