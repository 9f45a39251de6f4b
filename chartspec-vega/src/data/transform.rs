use crate::expr::Expr;
use crate::marks::values::ValueRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Max,
    Mean,
    Median,
    Min,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressionMethod {
    Linear,
    Log,
    Exp,
    Pow,
    Quad,
    Poly,
}

/// Data transforms, serialized with their `type` tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    Filter(FilterTransform),
    Formula(FormulaTransform),
    Identifier(IdentifierTransform),
    JoinAggregate(JoinAggregateTransform),
    Lookup(LookupTransform),
    Regression(RegressionTransform),
    Voronoi(VoronoiTransform),
    Window(WindowTransform),
}

impl Transform {
    pub fn filter(expr: Expr) -> Self {
        Transform::Filter(FilterTransform { expr })
    }

    pub fn formula<S: Into<String>>(expr: Expr, as_: S) -> Self {
        Transform::Formula(FormulaTransform {
            expr,
            as_: as_.into(),
        })
    }

    pub fn identifier<S: Into<String>>(as_: S) -> Self {
        Transform::Identifier(IdentifierTransform { as_: as_.into() })
    }

    /// The single output field this transform writes, for transforms that have one
    pub fn output_field(&self) -> Option<&str> {
        match self {
            Transform::Formula(t) => Some(t.as_.as_str()),
            Transform::Identifier(t) => Some(t.as_.as_str()),
            _ => None,
        }
    }

    /// Short name of the transform type, matching its serialized tag
    pub fn kind(&self) -> &'static str {
        match self {
            Transform::Filter(_) => "filter",
            Transform::Formula(_) => "formula",
            Transform::Identifier(_) => "identifier",
            Transform::JoinAggregate(_) => "joinaggregate",
            Transform::Lookup(_) => "lookup",
            Transform::Regression(_) => "regression",
            Transform::Voronoi(_) => "voronoi",
            Transform::Window(_) => "window",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterTransform {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaTransform {
    pub expr: Expr,
    #[serde(rename = "as")]
    pub as_: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierTransform {
    #[serde(rename = "as")]
    pub as_: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinAggregateTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupby: Option<Vec<String>>,
    pub fields: Vec<String>,
    pub ops: Vec<AggregateOp>,
    #[serde(rename = "as")]
    pub as_: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupTransform {
    pub from: String,
    pub key: String,
    pub fields: Vec<String>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionTransform {
    pub method: RegressionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub groupby: Vec<String>,
    pub x: String,
    pub y: String,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<Vec<String>>,
    pub params: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoronoiTransform {
    pub x: Expr,
    pub y: Expr,
    pub size: Vec<ValueRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowTransform {
    pub ops: Vec<AggregateOp>,
    pub groupby: Vec<String>,
    pub fields: Vec<String>,
    #[serde(rename = "as")]
    pub as_: Vec<String>,
    /// Rows preceding and following the current row; `None` is unbounded
    pub frame: [Option<u32>; 2],
}
