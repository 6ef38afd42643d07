//! Schema-aware compiler from typed search conditions to index queries
//!
//! A [`Schema`] maps column names to [`Mapper`]s. A [`Condition`] names a
//! column and a predicate; compiling it against the schema coerces its values
//! into the column's base type and produces a [`Query`]. The
//! [`QueryExecutor`] evaluates compiled queries against in-memory documents.
//!
//! ```no_run
//! use condex::{condition::builder, Mapper, Schema};
//!
//! let schema = Schema::builder()
//!     .mapper(Mapper::text("body"))
//!     .mapper(Mapper::geo_point("place", 8))
//!     .build()?;
//!
//! let query = builder::match_value("body", "Cassandra")
//!     .boost(0.5)
//!     .build()?
//!     .compile(&schema)?;
//! println!("{}", query);
//! # Ok::<(), condex::CondexError>(())
//! ```

pub mod condition;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod query;
pub mod schema;
pub mod sort;
pub mod tokenizer;

pub use condition::{Condition, ConditionBuilder, ConditionKind};
pub use config::{GeoConfig, SchemaSettings, TokenizerConfig};
pub use error::{CondexError, Result};
pub use models::{Document, DocumentId};
pub use query::{BiTemporalOperation, Query, QueryExecutor, QueryNode};
pub use schema::{BaseType, BaseValue, Mapper, MapperKind, Schema, SchemaBuilder};
pub use sort::{Sort, SortFieldSpec};
pub use tokenizer::{Analyzer, Tokenizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
