//! Schema definitions
//!
//! A schema maps column names to mappers and owns the analyzers text columns
//! are matched with. It is built once and never mutated, so it can be shared
//! behind an `Arc` by any number of compiling threads.

use std::collections::HashMap;
use std::sync::Arc;

use super::field_type::MapperKind;
use super::mapper::Mapper;
use crate::config::{
    SchemaSettings, TokenizerConfig, ENGLISH_ANALYZER, KEYWORD_ANALYZER, STANDARD_ANALYZER,
};
use crate::error::{CondexError, Result};
use crate::geo::MAX_PRECISION;
use crate::tokenizer::Analyzer;

/// Immutable set of mappers and analyzers
#[derive(Debug)]
pub struct Schema {
    mappers: HashMap<String, Mapper>,
    analyzers: HashMap<String, Arc<Analyzer>>,
    settings: SchemaSettings,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Mapper responsible for a field
    ///
    /// A dotted field such as `place.latitude` falls back to the mapper of its
    /// first component.
    pub fn mapper(&self, field: &str) -> Option<&Mapper> {
        self.mappers.get(field).or_else(|| {
            field
                .split_once('.')
                .and_then(|(column, _)| self.mappers.get(column))
        })
    }

    /// Mapper responsible for a field, or `UnresolvedField`
    pub fn resolve(&self, field: &str) -> Result<&Mapper> {
        self.mapper(field)
            .ok_or_else(|| CondexError::UnresolvedField(field.to_string()))
    }

    pub fn mappers(&self) -> impl Iterator<Item = &Mapper> {
        self.mappers.values()
    }

    pub fn analyzer(&self, name: &str) -> Option<Arc<Analyzer>> {
        self.analyzers.get(name).cloned()
    }

    pub fn default_analyzer(&self) -> &str {
        &self.settings.default_analyzer
    }

    /// Analyzer used to match values of a field
    pub fn field_analyzer(&self, field: &str) -> Result<Arc<Analyzer>> {
        let mapper = self.resolve(field)?;
        let name = mapper
            .analyzer()
            .unwrap_or(self.settings.default_analyzer.as_str());
        self.analyzer(name)
            .ok_or_else(|| CondexError::invalid(format!("Unknown analyzer '{}'", name)))
    }

    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }
}

/// Builder for [`Schema`]
#[derive(Debug)]
pub struct SchemaBuilder {
    mappers: Vec<Mapper>,
    analyzers: Vec<(String, TokenizerConfig)>,
    settings: SchemaSettings,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            mappers: Vec::new(),
            analyzers: Vec::new(),
            settings: SchemaSettings::default(),
        }
    }

    /// Add a mapper
    pub fn mapper(mut self, mapper: Mapper) -> Self {
        self.mappers.push(mapper);
        self
    }

    /// Register a text analyzer under a name
    pub fn analyzer(mut self, name: impl Into<String>, config: TokenizerConfig) -> Self {
        self.analyzers.push((name.into(), config));
        self
    }

    pub fn default_analyzer(mut self, name: impl Into<String>) -> Self {
        self.settings.default_analyzer = name.into();
        self
    }

    pub fn settings(mut self, settings: SchemaSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate and build the schema
    pub fn build(self) -> Result<Schema> {
        let mut analyzers: HashMap<String, Arc<Analyzer>> = HashMap::new();
        analyzers.insert(KEYWORD_ANALYZER.to_string(), Arc::new(Analyzer::Keyword));
        analyzers.insert(
            STANDARD_ANALYZER.to_string(),
            Arc::new(Analyzer::text(&TokenizerConfig::standard())?),
        );
        analyzers.insert(
            ENGLISH_ANALYZER.to_string(),
            Arc::new(Analyzer::text(&TokenizerConfig::default())?),
        );

        for (name, config) in &self.analyzers {
            if name.trim().is_empty() {
                return Err(CondexError::invalid("Analyzer name must not be blank"));
            }
            if name == KEYWORD_ANALYZER {
                return Err(CondexError::invalid(format!(
                    "Analyzer '{}' is built in and cannot be redefined",
                    name
                )));
            }
            analyzers.insert(name.clone(), Arc::new(Analyzer::text(config)?));
        }

        if !analyzers.contains_key(&self.settings.default_analyzer) {
            return Err(CondexError::invalid(format!(
                "Default analyzer '{}' is not registered",
                self.settings.default_analyzer
            )));
        }

        let geo = &self.settings.geo;
        if geo.max_levels == 0 || geo.max_levels > MAX_PRECISION {
            return Err(CondexError::invalid(format!(
                "Geo max levels must be in [1, {}], found {}",
                MAX_PRECISION, geo.max_levels
            )));
        }
        if !geo.dist_err_pct.is_finite() || geo.dist_err_pct < 0.0 || geo.dist_err_pct > 0.5 {
            return Err(CondexError::invalid(format!(
                "Geo dist_err_pct must be in [0, 0.5], found {}",
                geo.dist_err_pct
            )));
        }

        let mut mappers = HashMap::with_capacity(self.mappers.len());
        for mut mapper in self.mappers {
            if let MapperKind::GeoPoint { max_levels } = &mut mapper.kind {
                max_levels.get_or_insert(geo.max_levels);
            }
            if mapper.name.trim().is_empty() {
                return Err(CondexError::invalid("Mapper name must not be blank"));
            }
            if !mapper.boost.is_finite() || mapper.boost < 0.0 {
                return Err(CondexError::invalid(format!(
                    "Mapper '{}' boost must be a non-negative number, found {}",
                    mapper.name, mapper.boost
                )));
            }
            if let Some(name) = mapper.analyzer() {
                if !analyzers.contains_key(name) {
                    return Err(CondexError::invalid(format!(
                        "Mapper '{}' uses unknown analyzer '{}'",
                        mapper.name, name
                    )));
                }
            }
            mapper.prefix_tree()?;
            if mappers.contains_key(&mapper.name) {
                return Err(CondexError::invalid(format!(
                    "Duplicate mapper for field '{}'",
                    mapper.name
                )));
            }
            mappers.insert(mapper.name.clone(), mapper);
        }

        Ok(Schema {
            mappers,
            analyzers,
            settings: self.settings,
        })
    }
}
