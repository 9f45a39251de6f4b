//! Scales shared by the primary marks.

use crate::color::{color_value, CATEGORICAL_COLORS};
use crate::constants::{
    BAR_PADDING, COLOR_SCALE, DEFAULT_TRANSFORMED_TIME_DIMENSION, FILTERED_TABLE, LINEAR_PADDING,
    LINE_TYPE_SCALE, MULTI_COLOR_SCALE, SECONDARY_COLOR_SCALE, Y_LINEAR_SCALE,
};
use crate::props::{ColorScheme, FacetRef, LineType, LineTypeName, ScaleType};
use chartspec_vega::scale::{Scale, ScaleRange, ScaleType as VegaScaleType};
use serde_json::{json, Value};

/// Name of the x scale for a dimension scale type
pub fn x_scale_name(scale_type: ScaleType) -> &'static str {
    match scale_type {
        ScaleType::Time => "xTime",
        ScaleType::Linear => "xLinear",
        ScaleType::Point => "xPoint",
        ScaleType::Band => "xBand",
    }
}

/// The x scale for a mark's dimension.
///
/// Time scales read the `datetime0` field that the line builder derives from the dimension.
pub fn dimension_scale(scale_type: ScaleType, dimension: &str) -> Scale {
    let name = x_scale_name(scale_type);
    let width = ScaleRange::Named("width".to_string());
    match scale_type {
        ScaleType::Time => Scale::new(name, VegaScaleType::Time)
            .range(width)
            .domain(FILTERED_TABLE, vec![DEFAULT_TRANSFORMED_TIME_DIMENSION.to_string()]),
        ScaleType::Linear => Scale::new(name, VegaScaleType::Linear)
            .range(width)
            .domain(FILTERED_TABLE, vec![dimension.to_string()])
            .padding(LINEAR_PADDING)
            .zero(false)
            .nice(false),
        ScaleType::Point => Scale::new(name, VegaScaleType::Point)
            .range(width)
            .domain(FILTERED_TABLE, vec![dimension.to_string()]),
        ScaleType::Band => Scale::new(name, VegaScaleType::Band)
            .range(width)
            .domain(FILTERED_TABLE, vec![dimension.to_string()])
            .padding(BAR_PADDING),
    }
}

pub fn metric_scale(metric: &str) -> Scale {
    Scale::new(Y_LINEAR_SCALE, VegaScaleType::Linear)
        .range(ScaleRange::Named("height".to_string()))
        .domain(FILTERED_TABLE, vec![metric.to_string()])
        .zero(true)
        .nice(true)
}

/// Ordinal color scales for a color encoding; static colors need none.
///
/// A dual encoding gets the `colors` scale, mapping each primary value to a
/// rotation of the palette, and a `secondaryColor` scale whose domain picks the shade.
pub fn color_scales(color: &FacetRef<String>, color_scheme: ColorScheme) -> Vec<Scale> {
    let palette = CATEGORICAL_COLORS
        .iter()
        .map(|c| color_value(c, color_scheme))
        .collect::<Vec<_>>();
    match color {
        FacetRef::Field(field) => vec![ordinal_scale(COLOR_SCALE, field, palette_values(&palette))],
        FacetRef::Dual([primary, secondary]) => {
            let rotations = (0..palette.len())
                .map(|i| {
                    let mut shades = palette.clone();
                    shades.rotate_left(i);
                    json!(shades)
                })
                .collect();
            vec![
                ordinal_scale(COLOR_SCALE, primary, palette_values(&palette)),
                ordinal_scale(MULTI_COLOR_SCALE, primary, rotations),
                ordinal_scale(SECONDARY_COLOR_SCALE, secondary, palette_values(&palette)),
            ]
        }
        FacetRef::Static { .. } => Vec::new(),
    }
}

/// Ordinal dash-pattern scale when the line type encodes a field
pub fn line_type_scale(line_type: &FacetRef<LineType>) -> Option<Scale> {
    let field = line_type.primary_field()?;
    let dashes = [
        LineTypeName::Solid,
        LineTypeName::Dashed,
        LineTypeName::Dotted,
        LineTypeName::DotDash,
        LineTypeName::LongDash,
        LineTypeName::TwoDash,
    ]
    .into_iter()
    .map(|name| json!(LineType::from(name).stroke_dash()))
    .collect();
    Some(ordinal_scale(LINE_TYPE_SCALE, field, dashes))
}

fn ordinal_scale(name: &str, field: &str, range: Vec<Value>) -> Scale {
    Scale::new(name, VegaScaleType::Ordinal)
        .range(ScaleRange::Values(range))
        .domain(FILTERED_TABLE, vec![field.to_string()])
}

fn palette_values(palette: &[String]) -> Vec<Value> {
    palette.iter().map(|c| Value::from(c.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScaleType::Time, "xTime", "datetime0")]
    #[case(ScaleType::Linear, "xLinear", "x")]
    #[case(ScaleType::Point, "xPoint", "x")]
    #[case(ScaleType::Band, "xBand", "x")]
    fn test_dimension_scale(
        #[case] scale_type: ScaleType,
        #[case] name: &str,
        #[case] domain_field: &str,
    ) {
        let scale = dimension_scale(scale_type, "x");
        assert_eq!(scale.name, name);
        assert_eq!(scale.domain.unwrap().fields, vec![domain_field.to_string()]);
    }

    #[test]
    fn test_color_scales() {
        assert!(color_scales(&FacetRef::value("red".to_string()), ColorScheme::Light).is_empty());

        let scales = color_scales(&FacetRef::field("series"), ColorScheme::Light);
        assert_eq!(scales.len(), 1);
        assert_eq!(scales[0].name, COLOR_SCALE);

        let scales = color_scales(
            &FacetRef::Dual(["series".to_string(), "period".to_string()]),
            ColorScheme::Dark,
        );
        let names = scales.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["color", "colors", "secondaryColor"]);
        let Some(ScaleRange::Values(rotations)) = &scales[1].range else {
            panic!("expected explicit range");
        };
        assert_eq!(rotations[1][0], rotations[0][1]);
    }

    #[test]
    fn test_line_type_scale() {
        assert!(line_type_scale(&FacetRef::value(LineTypeName::Solid.into())).is_none());
        let scale = line_type_scale(&FacetRef::field("period")).unwrap();
        assert_eq!(scale.name, LINE_TYPE_SCALE);
    }
}
