//! The primary line mark and the hover marks shared with trendlines.

pub mod points;

use crate::color::color_value;
use crate::constants::{
    DEFAULT_TRANSFORMED_TIME_DIMENSION, FILTERED_TABLE, MARK_ID, SERIES_ID, Y_LINEAR_SCALE,
};
use crate::data::{has_output_field, series_id_transform, table_data_mut};
use crate::encoding::{
    color_production_rule, has_interactive_children, has_popover, has_tooltip,
    line_width_production_rule, opacity_production_rule, stroke_dash_production_rule,
};
use crate::error::ChartSpecError;
use crate::props::{
    ChildElement, ColorScheme, FacetRef, LineSpecProps, LineType, LineWidth, PrimaryMarkProps,
    ScaleType,
};
use crate::scale::{color_scales, dimension_scale, line_type_scale, metric_scale, x_scale_name};
use crate::signals::{generic_signal, uncontrolled_hover_signal};
use crate::trendline::add_trendlines;
use chartspec_vega::data::{Data, Transform, VoronoiTransform};
use chartspec_vega::marks::{Encode, Facet, Mark, ProductionRule, ValueRef};
use chartspec_vega::{Expr, Spec};
use points::{
    highlight_background_point, highlight_point, line_static_point, secondary_highlight_point,
    select_ring_point, static_point_test,
};

/// Everything the line mark builders read, with the line's defaults already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct LineMarkProps {
    pub name: String,
    pub dimension: String,
    pub metric: String,
    pub color: FacetRef<String>,
    pub color_scheme: ColorScheme,
    pub line_type: FacetRef<LineType>,
    pub line_width: FacetRef<LineWidth>,
    pub opacity: FacetRef<f64>,
    pub scale_type: ScaleType,
    pub static_point: Option<String>,
    pub children: Vec<ChildElement>,
}

impl LineMarkProps {
    /// Line props for marks layered over another primary mark, such as trendline hover marks.
    ///
    /// Everything but the name, metric and children comes from the primary mark.
    pub fn from_primary<M: PrimaryMarkProps + ?Sized>(
        mark: &M,
        name: String,
        metric: String,
        children: Vec<ChildElement>,
    ) -> Self {
        Self {
            name,
            dimension: mark.dimension().to_string(),
            metric,
            color: mark.color().clone(),
            color_scheme: mark.color_scheme(),
            line_type: mark.line_type().clone(),
            line_width: mark.line_width(),
            opacity: mark.opacity(),
            scale_type: mark.scale_type(),
            static_point: mark.static_point().map(str::to_string),
            children,
        }
    }
}

impl From<&LineSpecProps> for LineMarkProps {
    fn from(props: &LineSpecProps) -> Self {
        Self {
            name: props.name.clone(),
            dimension: props.dimension.clone(),
            metric: props.metric.clone(),
            color: props.color.clone(),
            color_scheme: props.color_scheme,
            line_type: props.line_type.clone(),
            line_width: props.line_width.clone(),
            opacity: props.opacity.clone(),
            scale_type: props.scale_type,
            static_point: props.static_point.clone(),
            children: props.children.clone(),
        }
    }
}

/// x encoding for a dimension; time dimensions read the derived `datetime0` field
pub fn x_production_rule(scale_type: ScaleType, dimension: &str) -> ValueRef {
    match scale_type {
        ScaleType::Time => {
            ValueRef::scaled(x_scale_name(scale_type), DEFAULT_TRANSFORMED_TIME_DIMENSION)
        }
        ScaleType::Linear | ScaleType::Point => ValueRef::scaled(x_scale_name(scale_type), dimension),
        ScaleType::Band => ValueRef::scaled(x_scale_name(scale_type), dimension).with_band(0.5),
    }
}

/// Stroke opacity of a line. Lines shown only on hover are transparent until their
/// series is hovered on the mark `name`.
pub fn line_stroke_opacity(
    name: &str,
    opacity: &FacetRef<f64>,
    display_on_hover: bool,
) -> ProductionRule {
    let opacity = opacity_production_rule(opacity);
    if !display_on_hover {
        return opacity.into();
    }
    let hovered_series = Expr::signal(format!("{name}_hoveredSeries"));
    vec![
        opacity.with_test(hovered_series.strict_eq(Expr::datum(SERIES_ID))),
        ValueRef::value(0),
    ]
    .into()
}

/// Filter for the rows to highlight: the selected row, else the hovered row.
///
/// Without a selectable child only the hovered row is highlighted.
pub fn highlighted_data_filter(name: &str, selectable: bool) -> Expr {
    let hovered = Expr::signal(format!("{name}_hoveredId")).strict_eq(Expr::datum(MARK_ID));
    if !selectable {
        return hovered;
    }
    let selected_id = Expr::signal(format!("{name}_selectedId"));
    selected_id
        .clone()
        .strict_eq(Expr::datum(MARK_ID))
        .or((!selected_id).and(hovered))
}

fn transparent() -> ValueRef {
    ValueRef::value("transparent")
}

/// Vertical rule at the highlighted row
pub fn hover_rule(props: &LineMarkProps) -> Mark {
    Mark::rule(format!("{}_hoverRule", props.name))
        .from_data(format!("{}_highlightedData", props.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::value(0))
                .enter("y2", ValueRef::signal(Expr::signal("height")))
                .enter("strokeWidth", ValueRef::value(1))
                .enter(
                    "stroke",
                    ValueRef::value(color_value("gray-300", props.color_scheme)),
                )
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

/// Invisible points the voronoi cells are computed from
pub fn points_for_voronoi(props: &LineMarkProps, data_source: &str) -> Mark {
    Mark::symbol(format!("{}_pointsForVoronoi", props.name))
        .from_data(data_source)
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("fill", transparent())
                .enter("stroke", transparent())
                .update("x", x_production_rule(props.scale_type, &props.dimension)),
        )
}

/// Voronoi cells around the points, these receive the hover events.
pub fn voronoi_path(props: &LineMarkProps) -> Mark {
    let mut encode = Encode::default()
        .enter("fill", transparent())
        .enter("stroke", transparent())
        .enter("isVoronoi", ValueRef::value(true));
    if has_tooltip(&props.children) {
        encode = encode.enter("tooltip", ValueRef::signal(Expr::datum("datum")));
    }
    if has_popover(&props.children) {
        encode = encode.enter("cursor", ValueRef::value("pointer"));
    }

    Mark::path(format!("{}_voronoi", props.name))
        .from_data(format!("{}_pointsForVoronoi", props.name))
        .encode(encode)
        .transform(Transform::Voronoi(VoronoiTransform {
            x: Expr::datum("x"),
            y: Expr::datum("y"),
            size: vec![
                ValueRef::signal(Expr::signal("width")),
                ValueRef::signal(Expr::signal("height")),
            ],
        }))
}

/// Marks that highlight the row nearest to the pointer.
///
/// `secondary_metric` adds a second highlight point on that field of the same row.
pub fn line_hover_marks(
    props: &LineMarkProps,
    data_source: &str,
    secondary_metric: Option<&str>,
) -> Vec<Mark> {
    let mut marks = vec![
        hover_rule(props),
        highlight_background_point(props),
        highlight_point(props),
    ];
    if let Some(secondary_metric) = secondary_metric {
        marks.push(secondary_highlight_point(props, secondary_metric));
    }
    marks.push(points_for_voronoi(props, data_source));
    marks.push(voronoi_path(props));
    marks
}

/// Append a line mark, its scales and data, and everything its children need.
#[tracing::instrument(skip_all, fields(name = %props.name))]
pub fn add_line(spec: &mut Spec, props: &LineSpecProps) -> Result<(), ChartSpecError> {
    let facets = props.facets();
    let line_props = LineMarkProps::from(props);

    let table = table_data_mut(&mut spec.data);
    if props.has_time_scale() && !has_output_field(&table.transform, DEFAULT_TRANSFORMED_TIME_DIMENSION) {
        table.transform.push(Transform::formula(
            Expr::call("toDate", [Expr::datum(props.dimension.as_str())]),
            DEFAULT_TRANSFORMED_TIME_DIMENSION,
        ));
    }
    if !has_output_field(&table.transform, SERIES_ID) {
        table.transform.extend(series_id_transform(&facets.facets));
    }
    if let Some(static_point) = &props.static_point {
        spec.data.push(
            Data::derived(format!("{}_staticPointData", props.name), FILTERED_TABLE)
                .with_transforms([Transform::filter(static_point_test(static_point))]),
        );
    }
    let interactive = has_interactive_children(&props.children);
    if interactive {
        spec.data.push(
            Data::derived(format!("{}_highlightedData", props.name), FILTERED_TABLE)
                .with_transforms([Transform::filter(highlighted_data_filter(
                    &props.name,
                    has_popover(&props.children),
                ))]),
        );
    }

    spec.extend_scales(
        [
            dimension_scale(props.scale_type, &props.dimension),
            metric_scale(&props.metric),
        ]
        .into_iter()
        .chain(color_scales(&props.color, props.color_scheme))
        .chain(line_type_scale(&props.line_type)),
    );

    let line = Mark::line(props.name.as_str())
        .from_data(format!("{}_facet", props.name))
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                .enter("stroke", color_production_rule(&props.color, props.color_scheme))
                .enter("strokeDash", stroke_dash_production_rule(&props.line_type))
                .enter("strokeWidth", line_width_production_rule(&props.line_width))
                .update("x", x_production_rule(props.scale_type, &props.dimension))
                .update(
                    "strokeOpacity",
                    line_stroke_opacity(&props.name, &props.opacity, false),
                ),
        );
    spec.marks.push(
        Mark::group(format!("{}_group", props.name))
            .from_facet(Facet {
                name: format!("{}_facet", props.name),
                data: FILTERED_TABLE.to_string(),
                groupby: facets.facets.clone(),
            })
            .marks(vec![line]),
    );
    if props.static_point.is_some() {
        spec.marks.push(line_static_point(props));
    }

    add_trendlines(spec, props)?;

    if interactive {
        tracing::debug!("adding hover marks");
        spec.marks
            .extend(line_hover_marks(&line_props, FILTERED_TABLE, None));
        spec.extend_signals([uncontrolled_hover_signal(
            &props.name,
            true,
            &format!("{}_voronoi", props.name),
        )]);
        if has_popover(&props.children) {
            spec.marks.push(select_ring_point(&line_props));
            spec.extend_signals([
                generic_signal(format!("{}_selectedId", props.name)),
                generic_signal(format!("{}_selectedSeries", props.name)),
            ]);
        }
    }
    Ok(())
}
