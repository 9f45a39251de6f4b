//! Point marks drawn on top of a line: static points, hover and selection highlights.

use super::{x_production_rule, LineMarkProps};
use crate::color::color_value;
use crate::constants::{
    BACKGROUND_COLOR, DEFAULT_SYMBOL_SIZE, DEFAULT_SYMBOL_STROKE_WIDTH, MARK_ID, SELECT_RING_SIZE,
    STATIC_POINT_SIZE, STATIC_POINT_STROKE_WIDTH, Y_LINEAR_SCALE,
};
use crate::encoding::{
    color_production_rule, has_popover, highlight_opacity_value, opacity_production_rule,
};
use crate::props::LineSpecProps;
use chartspec_vega::marks::{Encode, Mark, ValueRef};
use chartspec_vega::Expr;

pub(crate) fn static_point_test(static_point: &str) -> Expr {
    Expr::datum(static_point).and(Expr::datum(static_point).strict_eq(true))
}

fn selected_test(name: &str) -> Expr {
    let selected_id = Expr::signal(format!("{name}_selectedId"));
    selected_id
        .clone()
        .and(selected_id.strict_eq(Expr::datum(MARK_ID)))
}

fn background() -> ValueRef {
    ValueRef::signal(Expr::signal(BACKGROUND_COLOR))
}

fn highlighted_data(name: &str) -> String {
    format!("{name}_highlightedData")
}

/// Points for rows flagged by the line's `staticPoint` field
pub fn line_static_point(props: &LineSpecProps) -> Mark {
    Mark::symbol(format!("{}_staticPoints", props.name))
        .from_data(format!("{}_staticPointData", props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("fill", color_production_rule(&props.color, props.color_scheme))
                .enter("stroke", background())
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

/// Background-colored point under the highlight point so that nothing shows through it
pub fn highlight_background_point(props: &LineMarkProps) -> Mark {
    Mark::symbol(format!("{}_pointBackground", props.name))
        .from_data(highlighted_data(&props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("fill", background())
                .enter("stroke", background())
                .update("size", highlight_point_size(props))
                .update("strokeWidth", highlight_point_stroke_width(props))
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

/// Point shown on the line for the hovered or selected row
pub fn highlight_point(props: &LineMarkProps) -> Mark {
    Mark::symbol(format!("{}_point", props.name))
        .from_data(highlighted_data(&props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("stroke", color_production_rule(&props.color, props.color_scheme))
                .update("fill", highlight_point_fill(props))
                .update("size", highlight_point_size(props))
                .update("stroke", highlight_point_stroke(props))
                .update("strokeOpacity", highlight_point_stroke_opacity(props))
                .update("strokeWidth", highlight_point_stroke_width(props))
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

/// Hollow point on a second metric of the highlighted row
pub fn secondary_highlight_point(props: &LineMarkProps, secondary_metric: &str) -> Mark {
    Mark::symbol(format!("{}_secondaryPoint", props.name))
        .from_data(highlighted_data(&props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, secondary_metric))
                .enter("fill", background())
                .enter("stroke", color_production_rule(&props.color, props.color_scheme))
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

pub fn highlight_point_fill(props: &LineMarkProps) -> Vec<ValueRef> {
    let color = color_production_rule(&props.color, props.color_scheme);
    let mut rules = Vec::new();
    if let Some(static_point) = &props.static_point {
        rules.push(color.clone().with_test(static_point_test(static_point)));
    }
    if has_popover(&props.children) {
        rules.push(color.with_test(selected_test(&props.name)));
    }
    rules.push(background());
    rules
}

pub fn highlight_point_stroke(props: &LineMarkProps) -> Vec<ValueRef> {
    let color = color_production_rule(&props.color, props.color_scheme);
    let mut rules = Vec::new();
    if let Some(static_point) = &props.static_point {
        rules.push(color.clone().with_test(static_point_test(static_point)));
    }
    if has_popover(&props.children) {
        rules.push(background().with_test(selected_test(&props.name)));
    }
    rules.push(color);
    rules
}

pub fn highlight_point_stroke_opacity(props: &LineMarkProps) -> Vec<ValueRef> {
    let opacity = opacity_production_rule(&props.opacity);
    let mut rules = Vec::new();
    if let Some(static_point) = &props.static_point {
        rules.push(highlight_opacity_value(&opacity).with_test(static_point_test(static_point)));
    }
    rules.push(opacity);
    rules
}

/// Static points are drawn smaller since their stroke is wider
pub fn highlight_point_size(props: &LineMarkProps) -> Vec<ValueRef> {
    let mut rules = Vec::new();
    if let Some(static_point) = &props.static_point {
        rules.push(ValueRef::value(STATIC_POINT_SIZE).with_test(static_point_test(static_point)));
    }
    rules.push(ValueRef::value(DEFAULT_SYMBOL_SIZE));
    rules
}

pub fn highlight_point_stroke_width(props: &LineMarkProps) -> Vec<ValueRef> {
    let mut rules = Vec::new();
    if let Some(static_point) = &props.static_point {
        rules.push(
            ValueRef::value(STATIC_POINT_STROKE_WIDTH).with_test(static_point_test(static_point)),
        );
    }
    rules.push(ValueRef::value(DEFAULT_SYMBOL_STROKE_WIDTH));
    rules
}

/// Ring drawn around the selected point
pub fn select_ring_point(props: &LineMarkProps) -> Mark {
    let selected = selected_test(&props.name);
    Mark::symbol(format!("{}_pointSelectRing", props.name))
        .from_data(highlighted_data(&props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("fill", background())
                .enter(
                    "stroke",
                    ValueRef::value(color_value("static-blue", props.color_scheme)),
                )
                .update(
                    "size",
                    vec![
                        ValueRef::value(SELECT_RING_SIZE).with_test(selected.clone()),
                        ValueRef::value(0),
                    ],
                )
                .update(
                    "strokeWidth",
                    vec![
                        ValueRef::value(DEFAULT_SYMBOL_STROKE_WIDTH).with_test(selected),
                        ValueRef::value(0),
                    ],
                )
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{ChartPopoverProps, ChildElement};
    use serde_json::json;

    fn line_props() -> LineMarkProps {
        LineMarkProps::from(&LineSpecProps::default())
    }

    #[test]
    fn test_plain_highlight_rules() {
        let props = line_props();
        assert_eq!(
            serde_json::to_value(highlight_point_fill(&props)).unwrap(),
            json!([{"signal": "backgroundColor"}])
        );
        assert_eq!(
            serde_json::to_value(highlight_point_size(&props)).unwrap(),
            json!([{"value": 100.0}])
        );
    }

    #[test]
    fn test_static_point_rules() {
        let props = LineMarkProps {
            static_point: Some("isKey".to_string()),
            ..line_props()
        };
        let size = highlight_point_size(&props);
        assert_eq!(size.len(), 2);
        assert_eq!(
            size[0].test.as_ref().unwrap().render(),
            "datum.isKey && datum.isKey === true"
        );
        assert_eq!(size[0].as_f64(), Some(64.0));

        let opacity = highlight_point_stroke_opacity(&props);
        assert_eq!(opacity[0].as_f64(), Some(0.2));
        assert_eq!(opacity[1].as_f64(), Some(1.0));
    }

    #[test]
    fn test_popover_selection_rules() {
        let props = LineMarkProps {
            children: vec![ChildElement::ChartPopover(ChartPopoverProps::default())],
            ..line_props()
        };
        let stroke = highlight_point_stroke(&props);
        assert_eq!(
            serde_json::to_value(&stroke).unwrap(),
            json!([
                {
                    "test": "line0_selectedId && line0_selectedId === datum.rscMarkId",
                    "signal": "backgroundColor"
                },
                {"scale": "color", "field": "series"}
            ])
        );

        let ring = select_ring_point(&props);
        assert_eq!(ring.name, "line0_pointSelectRing");
        assert_eq!(ring.source_data(), Some("line0_highlightedData"));
    }

    #[test]
    fn test_static_point_mark() {
        let props = LineSpecProps {
            static_point: Some("isKey".to_string()),
            ..Default::default()
        };
        let mark = line_static_point(&props);
        assert_eq!(mark.source_data(), Some("line0_staticPointData"));
        assert_eq!(
            serde_json::to_value(mark.encode.unwrap().update).unwrap(),
            json!({"x": {"scale": "xTime", "field": "datetime0"}})
        );
    }
}
