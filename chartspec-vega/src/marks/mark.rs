use crate::data::Transform;
use crate::marks::values::Encode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Area,
    Group,
    Line,
    Path,
    Rect,
    Rule,
    Symbol,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    pub name: String,
    pub data: String,
    pub groupby: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct MarkFrom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<Facet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub name: String,
    #[serde(rename = "type")]
    pub mark_type: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<MarkFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<Encode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

macro_rules! mark_type_fn {
    ($name:ident, $mark_type:expr) => {
        pub fn $name<S: Into<String>>(name: S) -> Self {
            Self::new($mark_type, name)
        }
    };
}

impl Mark {
    pub fn new<S: Into<String>>(mark_type: MarkType, name: S) -> Self {
        Self {
            name: name.into(),
            mark_type,
            from: None,
            clip: None,
            interactive: None,
            encode: None,
            marks: Vec::new(),
            transform: Vec::new(),
        }
    }

    mark_type_fn!(group, MarkType::Group);
    mark_type_fn!(line, MarkType::Line);
    mark_type_fn!(path, MarkType::Path);
    mark_type_fn!(rect, MarkType::Rect);
    mark_type_fn!(rule, MarkType::Rule);
    mark_type_fn!(symbol, MarkType::Symbol);

    /// Draw items from a named data source
    pub fn from_data<S: Into<String>>(self, data: S) -> Self {
        Self {
            from: Some(MarkFrom {
                data: Some(data.into()),
                facet: None,
            }),
            ..self
        }
    }

    /// Partition a data source into one group item per facet-group
    pub fn from_facet(self, facet: Facet) -> Self {
        Self {
            from: Some(MarkFrom {
                data: None,
                facet: Some(facet),
            }),
            ..self
        }
    }

    pub fn clip(self, clip: bool) -> Self {
        Self {
            clip: Some(clip),
            ..self
        }
    }

    pub fn interactive(self, interactive: bool) -> Self {
        Self {
            interactive: Some(interactive),
            ..self
        }
    }

    pub fn encode(self, encode: Encode) -> Self {
        Self {
            encode: Some(encode),
            ..self
        }
    }

    pub fn marks(self, marks: Vec<Mark>) -> Self {
        Self { marks, ..self }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }

    /// Name of the data source (or facet source) this mark draws from
    pub fn source_data(&self) -> Option<&str> {
        let from = self.from.as_ref()?;
        from.data
            .as_deref()
            .or_else(|| from.facet.as_ref().map(|f| f.data.as_str()))
    }

    /// Depth-first search for a mark by name, including this mark
    pub fn find(&self, name: &str) -> Option<&Mark> {
        if self.name == name {
            return Some(self);
        }
        self.marks.iter().find_map(|m| m.find(name))
    }
}
