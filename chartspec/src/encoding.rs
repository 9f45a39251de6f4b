//! Production rules shared by every mark type.

use crate::color::color_value;
use crate::constants::{
    COLOR_SCALE, HIGHLIGHT_CONTRAST_RATIO, LINE_TYPE_SCALE, LINE_WIDTH_SCALE, MULTI_COLOR_SCALE,
    OPACITY_SCALE, SECONDARY_COLOR_SCALE,
};
use crate::props::{ChildElement, ColorScheme, FacetRef, LineType, LineWidth};
use chartspec_vega::marks::ValueRef;
use chartspec_vega::Expr;
use serde_json::json;

/// Color encoding for fill or stroke.
///
/// A dual color facet picks a shade from the per-series color array using the
/// position of the secondary value in the secondary color domain.
pub fn color_production_rule(color: &FacetRef<String>, color_scheme: ColorScheme) -> ValueRef {
    match color {
        FacetRef::Field(field) => ValueRef::scaled(COLOR_SCALE, field.as_str()),
        FacetRef::Dual([primary, secondary]) => {
            let series_colors =
                || Expr::call("scale", [Expr::str(MULTI_COLOR_SCALE), Expr::datum(primary.as_str())]);
            let shade = Expr::call(
                "indexof",
                [
                    Expr::call("domain", [Expr::str(SECONDARY_COLOR_SCALE)]),
                    Expr::datum(secondary.as_str()),
                ],
            ) % Expr::call("length", [series_colors()]);
            ValueRef::signal(series_colors().index(shade))
        }
        FacetRef::Static { value } => ValueRef::value(color_value(value, color_scheme)),
    }
}

pub fn stroke_dash_production_rule(line_type: &FacetRef<LineType>) -> ValueRef {
    match line_type {
        FacetRef::Field(field) | FacetRef::Dual([field, _]) => {
            ValueRef::scaled(LINE_TYPE_SCALE, field.as_str())
        }
        FacetRef::Static { value } => ValueRef::value(json!(value.stroke_dash())),
    }
}

pub fn line_width_production_rule(line_width: &FacetRef<LineWidth>) -> ValueRef {
    match line_width {
        FacetRef::Field(field) | FacetRef::Dual([field, _]) => {
            ValueRef::scaled(LINE_WIDTH_SCALE, field.as_str())
        }
        FacetRef::Static { value } => ValueRef::value(value.pixels()),
    }
}

pub fn opacity_production_rule(opacity: &FacetRef<f64>) -> ValueRef {
    match opacity {
        FacetRef::Field(field) | FacetRef::Dual([field, _]) => {
            ValueRef::scaled(OPACITY_SCALE, field.as_str())
        }
        FacetRef::Static { value } => ValueRef::value(*value),
    }
}

/// Faded version of an opacity rule, for items that are not highlighted
pub fn highlight_opacity_value(opacity: &ValueRef) -> ValueRef {
    if let Some(signal) = &opacity.signal {
        return ValueRef::signal(signal.clone() / HIGHLIGHT_CONTRAST_RATIO);
    }
    ValueRef::value(opacity.as_f64().unwrap_or(1.0) / HIGHLIGHT_CONTRAST_RATIO)
}

pub fn has_tooltip(children: &[ChildElement]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, ChildElement::ChartTooltip(_)))
}

pub fn has_popover(children: &[ChildElement]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, ChildElement::ChartPopover(_)))
}

pub fn has_interactive_children(children: &[ChildElement]) -> bool {
    has_tooltip(children) || has_popover(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{ChartPopoverProps, ChartTooltipProps, LineTypeName, LineWidthName};
    use serde_json::json;

    #[test]
    fn test_color_rules() {
        let field = color_production_rule(&FacetRef::field("series"), ColorScheme::Light);
        assert_eq!(serde_json::to_value(field).unwrap(), json!({"scale": "color", "field": "series"}));

        let fixed = color_production_rule(&FacetRef::value("gray-900".to_string()), ColorScheme::Dark);
        assert_eq!(serde_json::to_value(fixed).unwrap(), json!({"value": "rgb(255, 255, 255)"}));

        let dual = color_production_rule(
            &FacetRef::Dual(["series".to_string(), "subSeries".to_string()]),
            ColorScheme::Light,
        );
        assert_eq!(
            dual.signal.unwrap().render(),
            "scale('colors', datum.series)[indexof(domain('secondaryColor'), datum.subSeries) % length(scale('colors', datum.series))]"
        );
    }

    #[test]
    fn test_dash_and_width_rules() {
        let dash = stroke_dash_production_rule(&FacetRef::value(LineTypeName::Dashed.into()));
        assert_eq!(serde_json::to_value(dash).unwrap(), json!({"value": [7.0, 4.0]}));

        let dash = stroke_dash_production_rule(&FacetRef::field("period"));
        assert_eq!(serde_json::to_value(dash).unwrap(), json!({"scale": "lineType", "field": "period"}));

        let width = line_width_production_rule(&FacetRef::value(LineWidthName::S.into()));
        assert_eq!(width.as_f64(), Some(1.5));
    }

    #[test]
    fn test_highlight_opacity() {
        assert_eq!(highlight_opacity_value(&ValueRef::value(1.0)).as_f64(), Some(0.2));
        let signal = highlight_opacity_value(&ValueRef::signal(Expr::signal("lineOpacity")));
        assert_eq!(signal.signal.unwrap().render(), "lineOpacity / 5");
    }

    #[test]
    fn test_child_predicates() {
        let tooltip = vec![ChildElement::ChartTooltip(ChartTooltipProps::default())];
        let popover = vec![ChildElement::ChartPopover(ChartPopoverProps::default())];
        assert!(has_tooltip(&tooltip) && !has_popover(&tooltip));
        assert!(has_popover(&popover) && !has_tooltip(&popover));
        assert!(has_interactive_children(&tooltip) && has_interactive_children(&popover));
        assert!(!has_interactive_children(&[]));
    }
}
