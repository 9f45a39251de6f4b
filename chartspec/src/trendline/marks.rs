use super::data::trendline_dimension;
use super::props::TrendlineSpecProps;
use crate::constants::{TRENDLINE_VALUE, TRENDLINE_X_SCALE, Y_LINEAR_SCALE};
use crate::encoding::{
    color_production_rule, has_tooltip, line_width_production_rule, stroke_dash_production_rule,
};
use crate::line::{line_hover_marks, line_stroke_opacity, x_production_rule, LineMarkProps};
use crate::props::{FacetRef, PrimaryMarkProps};
use chartspec_vega::marks::{Encode, Facet, Mark, ValueRef};

/// One clipped group per trendline, faceted like the mark, followed by the
/// shared hover group when any trendline has a tooltip.
#[tracing::instrument(skip_all, fields(mark = mark.name()))]
pub fn trendline_marks<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendlines: &[TrendlineSpecProps],
) -> Vec<Mark> {
    let facets = mark.facets().facets;
    let mut marks = trendlines
        .iter()
        .map(|trendline| {
            Mark::group(format!("{}_group", trendline.name))
                .clip(true)
                .from_facet(Facet {
                    name: format!("{}_facet", trendline.name),
                    data: trendline.line_data_name(),
                    groupby: facets.clone(),
                })
                .marks(vec![trendline_line_mark(mark, trendline)])
        })
        .collect::<Vec<_>>();

    if trendlines.iter().any(|t| has_tooltip(&t.children)) {
        let highlight_raw_point = trendlines.iter().any(|t| t.highlight_raw_point);
        marks.push(trendline_hover_group(mark, trendlines, highlight_raw_point));
    }
    marks
}

pub fn trendline_line_mark<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendline: &TrendlineSpecProps,
) -> Mark {
    let x = if mark.has_time_scale() {
        ValueRef::scaled(TRENDLINE_X_SCALE, trendline_dimension(mark))
    } else {
        x_production_rule(mark.scale_type(), mark.dimension())
    };
    let color = match &trendline.color {
        Some(color) => FacetRef::value(color.clone()),
        None => mark.color().clone(),
    };

    Mark::line(trendline.name.as_str())
        .from_data(format!("{}_facet", trendline.name))
        .interactive(false)
        .encode(
            Encode::default()
                .enter("y", ValueRef::scaled(Y_LINEAR_SCALE, trendline.metric.as_str()))
                .enter("stroke", color_production_rule(&color, mark.color_scheme()))
                .enter(
                    "strokeDash",
                    stroke_dash_production_rule(&FacetRef::value(trendline.line_type.clone())),
                )
                .enter(
                    "strokeWidth",
                    line_width_production_rule(&FacetRef::value(trendline.line_width)),
                )
                .update("x", x)
                .update(
                    "strokeOpacity",
                    line_stroke_opacity(
                        mark.name(),
                        &FacetRef::value(trendline.opacity),
                        trendline.display_on_hover,
                    ),
                ),
        )
}

/// Hover marks over the combined data of all interactive trendlines.
///
/// With `highlight_raw_point` the mark's own metric is highlighted too.
fn trendline_hover_group<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendlines: &[TrendlineSpecProps],
    highlight_raw_point: bool,
) -> Mark {
    let hover_props = LineMarkProps::from_primary(
        mark,
        format!("{}Trendline", mark.name()),
        TRENDLINE_VALUE.to_string(),
        trendlines
            .iter()
            .flat_map(|t| t.children.iter().cloned())
            .collect(),
    );
    Mark::group(format!("{}Trendline_hoverGroup", mark.name()))
        .clip(true)
        .marks(line_hover_marks(
            &hover_props,
            &format!("{}_allTrendlineData", mark.name()),
            highlight_raw_point.then(|| mark.metric()),
        ))
}
