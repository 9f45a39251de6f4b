use crate::expr::Expr;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A single encoding value: a literal, a signal expression, or a scaled field,
/// optionally guarded by a `test` predicate when used inside a rule list.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<f64>,
}

impl ValueRef {
    pub fn value<V: Into<Value>>(value: V) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn signal(expr: Expr) -> Self {
        Self {
            signal: Some(expr),
            ..Default::default()
        }
    }

    pub fn scaled<S: Into<String>, F: Into<String>>(scale: S, field: F) -> Self {
        Self {
            scale: Some(scale.into()),
            field: Some(field.into()),
            ..Default::default()
        }
    }

    pub fn with_test(self, test: Expr) -> Self {
        Self {
            test: Some(test),
            ..self
        }
    }

    pub fn with_band(self, band: f64) -> Self {
        Self {
            band: Some(band),
            ..self
        }
    }

    /// The literal value as a number, if this is a numeric literal
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_ref().and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductionRule {
    Value(ValueRef),
    Rules(Vec<ValueRef>),
}

impl ProductionRule {
    /// The rules in evaluation order; a single value is a one-element list
    pub fn rules(&self) -> &[ValueRef] {
        match self {
            ProductionRule::Value(v) => std::slice::from_ref(v),
            ProductionRule::Rules(rules) => rules.as_slice(),
        }
    }
}

impl From<ValueRef> for ProductionRule {
    fn from(value: ValueRef) -> Self {
        ProductionRule::Value(value)
    }
}

impl From<Vec<ValueRef>> for ProductionRule {
    fn from(rules: Vec<ValueRef>) -> Self {
        ProductionRule::Rules(rules)
    }
}

pub type EncodeEntry = IndexMap<String, ProductionRule>;

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Encode {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub enter: EncodeEntry,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub update: EncodeEntry,
}

impl Encode {
    pub fn enter<S: Into<String>, R: Into<ProductionRule>>(mut self, channel: S, rule: R) -> Self {
        self.enter.insert(channel.into(), rule.into());
        self
    }

    pub fn update<S: Into<String>, R: Into<ProductionRule>>(mut self, channel: S, rule: R) -> Self {
        self.update.insert(channel.into(), rule.into());
        self
    }
}
