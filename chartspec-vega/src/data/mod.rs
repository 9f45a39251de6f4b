pub mod transform;

pub use transform::{
    AggregateOp, FilterTransform, FormulaTransform, IdentifierTransform, JoinAggregateTransform,
    LookupTransform, RegressionMethod, RegressionTransform, Transform, VoronoiTransform,
    WindowTransform,
};

use serde::Serialize;
use serde_json::Value;

/// Where a derived data source reads its rows from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataSource {
    Single(String),
    /// Concatenation of several sources, in order
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Data {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl Data {
    /// A data source with inline values
    pub fn with_values<S: Into<String>>(name: S, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            source: None,
            values: Some(values),
            transform: Vec::new(),
        }
    }

    /// A data source derived from another named source
    pub fn derived<S: Into<String>, T: Into<String>>(name: S, source: T) -> Self {
        Self {
            name: name.into(),
            source: Some(DataSource::Single(source.into())),
            values: None,
            transform: Vec::new(),
        }
    }

    /// A data source concatenating the rows of several sources
    pub fn concatenated<S: Into<String>>(name: S, sources: Vec<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(DataSource::Many(sources)),
            values: None,
            transform: Vec::new(),
        }
    }

    pub fn with_transforms<I: IntoIterator<Item = Transform>>(mut self, transforms: I) -> Self {
        self.transform.extend(transforms);
        self
    }
}
