use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Band,
    Linear,
    Ordinal,
    Point,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScaleRange {
    /// A named range such as `width` or `height`
    Named(String),
    Values(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleDomain {
    pub data: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    pub name: String,
    #[serde(rename = "type")]
    pub scale_type: ScaleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ScaleRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ScaleDomain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
}

impl Scale {
    pub fn new<S: Into<String>>(name: S, scale_type: ScaleType) -> Self {
        Self {
            name: name.into(),
            scale_type,
            range: None,
            domain: None,
            padding: None,
            zero: None,
            nice: None,
        }
    }

    pub fn range(self, range: ScaleRange) -> Self {
        Self {
            range: Some(range),
            ..self
        }
    }

    pub fn domain<S: Into<String>>(self, data: S, fields: Vec<String>) -> Self {
        Self {
            domain: Some(ScaleDomain {
                data: data.into(),
                fields,
            }),
            ..self
        }
    }

    pub fn padding(self, padding: f64) -> Self {
        Self {
            padding: Some(padding),
            ..self
        }
    }

    pub fn zero(self, zero: bool) -> Self {
        Self {
            zero: Some(zero),
            ..self
        }
    }

    pub fn nice(self, nice: bool) -> Self {
        Self {
            nice: Some(nice),
            ..self
        }
    }
}
