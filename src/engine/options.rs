use std::path::PathBuf;

use super::directory::WalkOptions;
use super::metadata::{MetadataFilterConfig, TypeMask};
use super::patterns::{ContentPredicate, NamePredicate, Pattern};
use crate::error::ConfigError;
use crate::shared::{parse_datetime, parse_size};

/// Everything a search needs, fixed before the walk starts
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub roots: Vec<PathBuf>,
    pub metadata: MetadataFilterConfig,
    pub names: NamePredicate,
    pub contents: ContentPredicate,
    pub walk: WalkOptions,
}

impl SearchOptions {
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder::default()
    }
}

/// Builds [`SearchOptions`] one flag at a time.
///
/// Pattern methods append in call order. Set [`negation`](Self::negation)
/// before adding patterns; it decides how a leading `!` is read.
#[derive(Debug, Clone)]
pub struct SearchOptionsBuilder {
    negation: bool,
    roots: Vec<PathBuf>,
    metadata: MetadataFilterConfig,
    names: NamePredicate,
    contents: ContentPredicate,
    walk: WalkOptions,
}

impl Default for SearchOptionsBuilder {
    fn default() -> Self {
        Self {
            negation: true,
            roots: Vec::new(),
            metadata: MetadataFilterConfig::default(),
            names: NamePredicate::new(),
            contents: ContentPredicate::new(),
            walk: WalkOptions::default(),
        }
    }
}

impl SearchOptionsBuilder {
    pub fn negation(mut self, enabled: bool) -> Self {
        self.negation = enabled;
        self
    }

    pub fn name_pattern(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.names.push(Pattern::parse(raw, self.negation)?);
        Ok(self)
    }

    pub fn content_pattern(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.contents.push(Pattern::parse(raw, self.negation)?);
        Ok(self)
    }

    pub fn types(mut self, value: &str) -> Result<Self, ConfigError> {
        self.metadata.types = value.parse::<TypeMask>()?;
        Ok(self)
    }

    pub fn after(mut self, value: &str) -> Result<Self, ConfigError> {
        self.metadata.after = Some(parse_datetime(value)?);
        Ok(self)
    }

    pub fn before(mut self, value: &str) -> Result<Self, ConfigError> {
        self.metadata.before = Some(parse_datetime(value)?);
        Ok(self)
    }

    pub fn min_size(mut self, value: &str) -> Result<Self, ConfigError> {
        self.metadata.min_size = Some(parse_size(value)?);
        Ok(self)
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn walk(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    /// Finish building; with no roots the search starts at `.`
    pub fn build(self) -> SearchOptions {
        let roots = if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots
        };

        SearchOptions {
            roots,
            metadata: self.metadata,
            names: self.names,
            contents: self.contents,
            walk: self.walk,
        }
    }
}
