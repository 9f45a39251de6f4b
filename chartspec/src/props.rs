//! Author-facing chart description.
//!
//! These types are deserialized straight from the chart description JSON. Serde
//! defaults fill in everything the author leaves out, except trendlines, which are
//! normalized separately (see [`crate::trendline::props`]).

use crate::facet::{facets_from_props, Facets};
use serde::Deserialize;
use strum::{Display, VariantNames};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Type of the scale used for a mark's dimension (x) axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ScaleType {
    #[default]
    Time,
    Linear,
    Point,
    Band,
}

/// An encoding that can either partition the data or apply one static value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FacetRef<T> {
    /// Encode by a data field
    Field(String),
    /// Encode by a primary and a secondary data field
    Dual([String; 2]),
    Static { value: T },
}

impl<T> FacetRef<T> {
    pub fn field<S: Into<String>>(field: S) -> Self {
        FacetRef::Field(field.into())
    }

    pub fn value(value: T) -> Self {
        FacetRef::Static { value }
    }

    /// The data field this facet encodes by, primary field for dual facets
    pub fn primary_field(&self) -> Option<&str> {
        match self {
            FacetRef::Field(f) => Some(f),
            FacetRef::Dual([f, _]) => Some(f),
            FacetRef::Static { .. } => None,
        }
    }

    pub fn static_value(&self) -> Option<&T> {
        match self {
            FacetRef::Static { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LineTypeName {
    Solid,
    Dashed,
    Dotted,
    DotDash,
    ShortDash,
    LongDash,
    TwoDash,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LineType {
    Named(LineTypeName),
    /// Explicit dash pattern in pixels
    Custom(Vec<f64>),
}

impl LineType {
    pub fn stroke_dash(&self) -> Vec<f64> {
        match self {
            LineType::Named(name) => match name {
                LineTypeName::Solid => vec![],
                LineTypeName::Dashed => vec![7.0, 4.0],
                LineTypeName::Dotted => vec![2.0, 3.0],
                LineTypeName::DotDash => vec![2.0, 3.0, 7.0, 4.0],
                LineTypeName::ShortDash => vec![3.0, 4.0],
                LineTypeName::LongDash => vec![11.0, 4.0],
                LineTypeName::TwoDash => vec![5.0, 2.0, 11.0, 2.0],
            },
            LineType::Custom(dash) => dash.clone(),
        }
    }
}

impl From<LineTypeName> for LineType {
    fn from(name: LineTypeName) -> Self {
        LineType::Named(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
pub enum LineWidthName {
    XS,
    S,
    M,
    L,
    XL,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LineWidth {
    Named(LineWidthName),
    Pixels(f64),
}

impl LineWidth {
    pub fn pixels(&self) -> f64 {
        match self {
            LineWidth::Named(LineWidthName::XS) => 1.0,
            LineWidth::Named(LineWidthName::S) => 1.5,
            LineWidth::Named(LineWidthName::M) => 2.0,
            LineWidth::Named(LineWidthName::L) => 3.0,
            LineWidth::Named(LineWidthName::XL) => 4.0,
            LineWidth::Pixels(px) => *px,
        }
    }
}

impl From<LineWidthName> for LineWidth {
    fn from(name: LineWidthName) -> Self {
        LineWidth::Named(name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartTooltipProps {
    pub exclude_data_keys: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartPopoverProps {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricRangeProps {
    pub metric_start: Option<String>,
    pub metric_end: Option<String>,
    pub display_on_hover: bool,
}

/// Trendline exactly as the author wrote it; nothing is defaulted yet.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendlineProps {
    pub children: Vec<ChildElement>,
    pub color: Option<String>,
    pub dimension_range: Option<[Option<f64>; 2]>,
    pub display_on_hover: Option<bool>,
    pub highlight_raw_point: Option<bool>,
    pub line_type: Option<LineType>,
    pub line_width: Option<LineWidth>,
    /// Method string such as `linear`, `polynomial-3` or `movingAverage-7`
    pub method: Option<String>,
    pub opacity: Option<f64>,
}

/// Declarative children of a mark
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ChildElement {
    ChartTooltip(ChartTooltipProps),
    ChartPopover(ChartPopoverProps),
    MetricRange(MetricRangeProps),
    Trendline(TrendlineProps),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineSpecProps {
    pub name: String,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef<String>,
    pub line_type: FacetRef<LineType>,
    pub line_width: FacetRef<LineWidth>,
    pub opacity: FacetRef<f64>,
    pub scale_type: ScaleType,
    /// Boolean field marking rows that always show a point
    pub static_point: Option<String>,
    pub children: Vec<ChildElement>,
    #[serde(skip)]
    pub color_scheme: ColorScheme,
}

impl Default for LineSpecProps {
    fn default() -> Self {
        Self {
            name: "line0".to_string(),
            dimension: "datetime".to_string(),
            metric: "value".to_string(),
            color: FacetRef::field("series"),
            line_type: FacetRef::value(LineTypeName::Solid.into()),
            line_width: FacetRef::value(LineWidthName::M.into()),
            opacity: FacetRef::value(1.0),
            scale_type: ScaleType::Time,
            static_point: None,
            children: Vec::new(),
            color_scheme: ColorScheme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarSpecProps {
    pub name: String,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef<String>,
    pub line_type: FacetRef<LineType>,
    pub children: Vec<ChildElement>,
    #[serde(skip)]
    pub color_scheme: ColorScheme,
}

impl Default for BarSpecProps {
    fn default() -> Self {
        Self {
            name: "bar0".to_string(),
            dimension: "category".to_string(),
            metric: "value".to_string(),
            color: FacetRef::field("series"),
            line_type: FacetRef::value(LineTypeName::Solid.into()),
            children: Vec::new(),
            color_scheme: ColorScheme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum MarkProps {
    Line(LineSpecProps),
    Bar(BarSpecProps),
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartProps {
    pub color_scheme: ColorScheme,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub marks: Vec<MarkProps>,
}

/// Read-only view of a mark that trendlines can be attached to.
pub trait PrimaryMarkProps {
    fn name(&self) -> &str;
    fn dimension(&self) -> &str;
    fn metric(&self) -> &str;
    fn color(&self) -> &FacetRef<String>;
    fn line_type(&self) -> &FacetRef<LineType>;
    fn color_scheme(&self) -> ColorScheme;
    fn scale_type(&self) -> ScaleType;
    fn children(&self) -> &[ChildElement];

    /// Line styling that hover marks layered over this mark inherit
    fn line_width(&self) -> FacetRef<LineWidth> {
        FacetRef::value(LineWidthName::M.into())
    }

    fn opacity(&self) -> FacetRef<f64> {
        FacetRef::value(1.0)
    }

    fn static_point(&self) -> Option<&str> {
        None
    }

    fn facets(&self) -> Facets {
        facets_from_props(self.color(), self.line_type())
    }

    fn has_time_scale(&self) -> bool {
        self.scale_type() == ScaleType::Time
    }
}

impl PrimaryMarkProps for LineSpecProps {
    fn name(&self) -> &str {
        &self.name
    }
    fn dimension(&self) -> &str {
        &self.dimension
    }
    fn metric(&self) -> &str {
        &self.metric
    }
    fn color(&self) -> &FacetRef<String> {
        &self.color
    }
    fn line_type(&self) -> &FacetRef<LineType> {
        &self.line_type
    }
    fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }
    fn scale_type(&self) -> ScaleType {
        self.scale_type
    }
    fn children(&self) -> &[ChildElement] {
        &self.children
    }
    fn line_width(&self) -> FacetRef<LineWidth> {
        self.line_width.clone()
    }
    fn opacity(&self) -> FacetRef<f64> {
        self.opacity.clone()
    }
    fn static_point(&self) -> Option<&str> {
        self.static_point.as_deref()
    }
}

impl PrimaryMarkProps for BarSpecProps {
    fn name(&self) -> &str {
        &self.name
    }
    fn dimension(&self) -> &str {
        &self.dimension
    }
    fn metric(&self) -> &str {
        &self.metric
    }
    fn color(&self) -> &FacetRef<String> {
        &self.color
    }
    fn line_type(&self) -> &FacetRef<LineType> {
        &self.line_type
    }
    fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }
    // Bars always sit on a band scale
    fn scale_type(&self) -> ScaleType {
        ScaleType::Band
    }
    fn children(&self) -> &[ChildElement] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_defaults() {
        let props: LineSpecProps = serde_json::from_value(json!({})).unwrap();
        assert_eq!(props, LineSpecProps::default());
        assert_eq!(props.color.primary_field(), Some("series"));
    }

    #[test]
    fn test_facet_ref_forms() {
        let field: FacetRef<String> = serde_json::from_value(json!("series")).unwrap();
        assert_eq!(field, FacetRef::field("series"));

        let dual: FacetRef<String> = serde_json::from_value(json!(["series", "subSeries"])).unwrap();
        assert_eq!(
            dual,
            FacetRef::Dual(["series".to_string(), "subSeries".to_string()])
        );

        let fixed: FacetRef<LineType> = serde_json::from_value(json!({"value": "dotted"})).unwrap();
        assert_eq!(fixed.static_value().map(LineType::stroke_dash), Some(vec![2.0, 3.0]));

        let custom: FacetRef<LineType> = serde_json::from_value(json!({"value": [1, 2]})).unwrap();
        assert_eq!(custom.static_value().map(LineType::stroke_dash), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_children_and_marks() {
        let chart: ChartProps = serde_json::from_value(json!({
            "colorScheme": "dark",
            "marks": [{
                "type": "Line",
                "dimension": "date",
                "children": [
                    {"type": "ChartTooltip"},
                    {"type": "Trendline", "method": "average", "dimensionRange": [null, 10]}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(chart.color_scheme, ColorScheme::Dark);
        let MarkProps::Line(line) = &chart.marks[0] else {
            panic!("expected a line mark");
        };
        assert_eq!(line.dimension, "date");
        assert_eq!(line.children.len(), 2);
        let ChildElement::Trendline(trendline) = &line.children[1] else {
            panic!("expected a trendline child");
        };
        assert_eq!(trendline.method.as_deref(), Some("average"));
        assert_eq!(trendline.dimension_range, Some([None, Some(10.0)]));
    }

    #[test]
    fn test_line_width_pixels() {
        let named: LineWidth = serde_json::from_value(json!("XL")).unwrap();
        assert_eq!(named.pixels(), 4.0);
        let px: LineWidth = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(px.pixels(), 2.5);
    }
}
