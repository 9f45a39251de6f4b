//! Derived data sources that compute trendline values.

use super::method::TrendlineMethod;
use super::props::TrendlineSpecProps;
use crate::constants::{FILTERED_TABLE, MS_PER_DAY, TRENDLINE_VALUE};
use crate::data::{series_id_transform, table_data_mut};
use crate::encoding::{has_interactive_children, has_popover};
use crate::line::highlighted_data_filter;
use crate::props::PrimaryMarkProps;
use chartspec_vega::data::{
    AggregateOp, Data, JoinAggregateTransform, LookupTransform, RegressionTransform, Transform,
    WindowTransform,
};
use chartspec_vega::Expr;
use std::num::NonZeroU32;

/// Field regressions use as x: time dimensions are replaced by their normalized day count
pub fn trendline_dimension<M: PrimaryMarkProps + ?Sized>(mark: &M) -> String {
    if mark.has_time_scale() {
        normalized_dimension(mark.dimension())
    } else {
        mark.dimension().to_string()
    }
}

fn normalized_dimension(dimension: &str) -> String {
    format!("{dimension}Normalized")
}

/// Filter restricting rows to the trendline's dimension range, nothing if unbounded
pub fn dimension_range_transforms(dimension: &str, range: [Option<f64>; 2]) -> Vec<Transform> {
    let [min, max] = range;
    let bounds = [
        min.map(|min| Expr::datum(dimension).gte(Expr::num(min))),
        max.map(|max| Expr::datum(dimension).lte(Expr::num(max))),
    ];
    Expr::all(bounds.into_iter().flatten())
        .map(Transform::filter)
        .into_iter()
        .collect()
}

/// Mean of the metric per facet group
pub fn average_transform<M: PrimaryMarkProps + ?Sized>(mark: &M) -> Transform {
    Transform::JoinAggregate(JoinAggregateTransform {
        groupby: Some(mark.facets().facets),
        fields: vec![mark.metric().to_string()],
        ops: vec![AggregateOp::Mean],
        as_: vec![TRENDLINE_VALUE.to_string()],
    })
}

/// Regression fit per facet group.
///
/// With `params` the transform emits one row of coefficients per group instead of
/// points along the curve.
pub fn regression_transform<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    method: TrendlineMethod,
    params: bool,
) -> Option<Transform> {
    let regression_method = method.regression_method()?;
    let x = trendline_dimension(mark);
    Some(Transform::Regression(RegressionTransform {
        method: regression_method,
        order: method.polynomial_order(),
        groupby: mark.facets().facets,
        as_: (!params).then(|| vec![x.clone(), TRENDLINE_VALUE.to_string()]),
        x,
        y: mark.metric().to_string(),
        params,
    }))
}

/// Trailing mean over the current row and the `width - 1` rows before it
pub fn moving_average_transform<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    width: NonZeroU32,
) -> Transform {
    Transform::Window(WindowTransform {
        ops: vec![AggregateOp::Mean],
        groupby: mark.facets().facets,
        fields: vec![mark.metric().to_string()],
        as_: vec![TRENDLINE_VALUE.to_string()],
        frame: [Some(width.get() - 1), Some(0)],
    })
}

pub fn statistical_transforms<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    method: TrendlineMethod,
    params: bool,
) -> Vec<Transform> {
    match method {
        TrendlineMethod::Average => vec![average_transform(mark)],
        TrendlineMethod::MovingAverage(width) => vec![moving_average_transform(mark, width)],
        _ => regression_transform(mark, method, params).into_iter().collect(),
    }
}

/// Joins the fitted coefficients of each facet group onto its rows
pub fn param_lookup_transform(trendline_name: &str, facets: Vec<String>) -> Transform {
    Transform::Lookup(LookupTransform {
        from: format!("{trendline_name}_params"),
        key: "keys".to_string(),
        fields: facets,
        values: vec!["coef".to_string()],
    })
}

/// Evaluates the fitted curve at each row's x from the joined `coef` array
pub fn param_formula_transform(method: TrendlineMethod, dimension: &str) -> Option<Transform> {
    let coef = |i: u32| Expr::datum("coef").index(i);
    let x = || Expr::datum(dimension);
    let expr = match method {
        TrendlineMethod::Exponential => coef(0) + Expr::call("exp", [coef(1) * x()]),
        TrendlineMethod::Logarithmic => coef(0) + coef(1) * Expr::call("log", [x()]),
        TrendlineMethod::Power => coef(0) * Expr::call("pow", [x(), coef(1)]),
        _ => {
            let order = method.polynomial_order()?;
            Expr::sum(
                std::iter::once(coef(0)).chain(
                    (1..=order).map(|i| coef(i) * Expr::call("pow", [x(), Expr::num(i)])),
                ),
            )?
        }
    };
    Some(Transform::formula(expr, TRENDLINE_VALUE))
}

/// Appends the normalized time dimension to `transforms` unless it is already there
pub fn add_normalized_dimension_transform(transforms: &mut Vec<Transform>, dimension: &str) {
    let normalized = normalized_dimension(dimension);
    if transforms
        .iter()
        .any(|t| t.output_field() == Some(normalized.as_str()))
    {
        return;
    }
    let min = format!("{dimension}Min");
    transforms.push(Transform::JoinAggregate(JoinAggregateTransform {
        groupby: None,
        fields: vec![dimension.to_string()],
        ops: vec![AggregateOp::Min],
        as_: vec![min.clone()],
    }));
    transforms.push(Transform::formula(
        (Expr::datum(dimension) - Expr::datum(min) + Expr::num(MS_PER_DAY)) / Expr::num(MS_PER_DAY),
        normalized,
    ));
}

/// Data sources for every trendline on the mark, plus the combined sources
/// interactive trendlines highlight from.
pub fn trendline_data<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendlines: &[TrendlineSpecProps],
) -> Vec<Data> {
    let mut data = Vec::new();
    let facets = mark.facets().facets;
    let mark_name = mark.name();
    let mut interactive_sources = Vec::new();

    for trendline in trendlines {
        let range = dimension_range_transforms(mark.dimension(), trendline.dimension_range);
        let name = &trendline.name;
        let interactive = has_interactive_children(&trendline.children);
        let method = trendline.method;

        if method.is_regression() {
            data.push(
                Data::derived(format!("{name}_highResolutionData"), FILTERED_TABLE)
                    .with_transforms(
                        range
                            .iter()
                            .cloned()
                            .chain(statistical_transforms(mark, method, false))
                            .chain(series_id_transform(&facets)),
                    ),
            );
            if interactive {
                data.push(
                    Data::derived(format!("{name}_params"), FILTERED_TABLE).with_transforms(
                        range
                            .iter()
                            .cloned()
                            .chain(statistical_transforms(mark, method, true)),
                    ),
                );
                data.push(
                    Data::derived(format!("{name}_data"), FILTERED_TABLE).with_transforms(
                        range
                            .iter()
                            .cloned()
                            .chain([param_lookup_transform(name, facets.clone())])
                            .chain(param_formula_transform(method, &trendline_dimension(mark))),
                    ),
                );
            }
        } else if method.is_window() {
            // the window needs the rows outside the range to average across the boundary
            data.push(
                Data::derived(format!("{name}_data"), FILTERED_TABLE).with_transforms(
                    statistical_transforms(mark, method, false)
                        .into_iter()
                        .chain(range),
                ),
            );
        } else {
            data.push(
                Data::derived(format!("{name}_data"), FILTERED_TABLE)
                    .with_transforms(range.into_iter().chain(statistical_transforms(mark, method, false))),
            );
        }

        if interactive {
            interactive_sources.push(format!("{name}_data"));
        }
    }

    if !interactive_sources.is_empty() {
        let all_trendline_data = format!("{mark_name}_allTrendlineData");
        let selectable = trendlines.iter().any(|t| has_popover(&t.children));
        data.push(Data::concatenated(all_trendline_data.clone(), interactive_sources));
        data.push(
            Data::derived(format!("{mark_name}Trendline_highlightedData"), all_trendline_data)
                .with_transforms([Transform::filter(highlighted_data_filter(
                    &format!("{mark_name}Trendline"),
                    selectable,
                ))]),
        );
    }
    data
}

/// Append the trendline data sources, normalizing the time dimension on `table`
/// when a regression needs it.
#[tracing::instrument(skip_all, fields(mark = mark.name()))]
pub fn add_trendline_data<M: PrimaryMarkProps + ?Sized>(
    data: &mut Vec<Data>,
    mark: &M,
    trendlines: &[TrendlineSpecProps],
) {
    data.extend(trendline_data(mark, trendlines));

    if mark.has_time_scale() && trendlines.iter().any(|t| t.method.is_regression()) {
        tracing::debug!("normalizing time dimension `{}`", mark.dimension());
        let table = table_data_mut(data);
        add_normalized_dimension_transform(&mut table.transform, mark.dimension());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{ChartPopoverProps, ChartTooltipProps, ChildElement, LineSpecProps, ScaleType};
    use crate::trendline::props::apply_trendline_prop_defaults;
    use crate::props::TrendlineProps;
    use rstest::rstest;
    use serde_json::json;

    fn trendline(method: &str, children: Vec<ChildElement>) -> TrendlineSpecProps {
        let props = TrendlineProps {
            method: Some(method.to_string()),
            children,
            ..Default::default()
        };
        apply_trendline_prop_defaults(&props, "line0", 0).unwrap()
    }

    fn line(scale_type: ScaleType) -> LineSpecProps {
        LineSpecProps {
            dimension: "date".to_string(),
            scale_type,
            ..Default::default()
        }
    }

    fn filter_expr(transforms: &[Transform]) -> Vec<String> {
        transforms
            .iter()
            .filter_map(|t| match t {
                Transform::Filter(f) => Some(f.expr.render()),
                _ => None,
            })
            .collect()
    }

    #[rstest]
    #[case([Some(5.0), None], vec!["datum.x >= 5"])]
    #[case([None, Some(10.0)], vec!["datum.x <= 10"])]
    #[case([Some(5.0), Some(10.0)], vec!["datum.x >= 5 && datum.x <= 10"])]
    #[case([Some(-2.5), None], vec!["datum.x >= -2.5"])]
    #[case([None, None], vec![])]
    fn test_dimension_range_transforms(#[case] range: [Option<f64>; 2], #[case] expected: Vec<&str>) {
        assert_eq!(filter_expr(&dimension_range_transforms("x", range)), expected);
    }

    #[rstest]
    #[case("linear", "datum.coef[0] + datum.coef[1] * pow(datum.x, 1)")]
    #[case(
        "polynomial-3",
        "datum.coef[0] + datum.coef[1] * pow(datum.x, 1) + datum.coef[2] * pow(datum.x, 2) + datum.coef[3] * pow(datum.x, 3)"
    )]
    #[case("exponential", "datum.coef[0] + exp(datum.coef[1] * datum.x)")]
    #[case("logarithmic", "datum.coef[0] + datum.coef[1] * log(datum.x)")]
    #[case("power", "datum.coef[0] * pow(datum.x, datum.coef[1])")]
    fn test_param_formula(#[case] method: &str, #[case] expected: &str) {
        let method: TrendlineMethod = method.parse().unwrap();
        let Some(Transform::Formula(formula)) = param_formula_transform(method, "x") else {
            panic!("expected formula");
        };
        assert_eq!(formula.expr.render(), expected);
        assert_eq!(formula.as_, TRENDLINE_VALUE);
    }

    #[test]
    fn test_param_formula_without_fit() {
        assert!(param_formula_transform(TrendlineMethod::Average, "x").is_none());
    }

    #[test]
    fn test_normalized_dimension_is_idempotent() {
        let mut transforms = vec![];
        add_normalized_dimension_transform(&mut transforms, "date");
        add_normalized_dimension_transform(&mut transforms, "date");
        assert_eq!(
            serde_json::to_value(&transforms).unwrap(),
            json!([
                {"type": "joinaggregate", "fields": ["date"], "ops": ["min"], "as": ["dateMin"]},
                {
                    "type": "formula",
                    "expr": "(datum.date - datum.dateMin + 86400000) / 86400000",
                    "as": "dateNormalized"
                }
            ])
        );
    }

    #[rstest]
    #[case(ScaleType::Time, "dateNormalized")]
    #[case(ScaleType::Linear, "date")]
    fn test_regression_x(#[case] scale_type: ScaleType, #[case] x: &str) {
        let Some(Transform::Regression(regression)) =
            regression_transform(&line(scale_type), TrendlineMethod::Quadratic, false)
        else {
            panic!("expected regression");
        };
        assert_eq!(regression.x, x);
        assert_eq!(regression.order, Some(2));
        assert_eq!(regression.as_, Some(vec![x.to_string(), TRENDLINE_VALUE.to_string()]));
    }

    #[rstest]
    #[case(1, json!([0, 0]))]
    #[case(2, json!([1, 0]))]
    #[case(7, json!([6, 0]))]
    fn test_moving_average_frame(#[case] width: u32, #[case] frame: serde_json::Value) {
        let width = NonZeroU32::new(width).unwrap();
        let transform = moving_average_transform(&line(ScaleType::Time), width);
        let value = serde_json::to_value(&transform).unwrap();
        assert_eq!(value["type"], json!("window"));
        assert_eq!(value["frame"], frame);
        assert_eq!(value["ops"], json!(["mean"]));
    }

    #[test]
    fn test_moving_average_filters_after_window() {
        let mut trendline = trendline("movingAverage-7", vec![]);
        trendline.dimension_range = [None, Some(100.0)];
        let data = trendline_data(&line(ScaleType::Time), &[trendline]);
        assert_eq!(data.len(), 1);
        let kinds = data[0].transform.iter().map(Transform::kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["window", "filter"]);
    }

    #[test]
    fn test_interactive_regression_data() {
        let trendline = trendline(
            "exponential",
            vec![ChildElement::ChartTooltip(ChartTooltipProps::default())],
        );
        let data = trendline_data(&line(ScaleType::Linear), &[trendline]);
        let names = data.iter().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "line0Trendline0_highResolutionData",
                "line0Trendline0_params",
                "line0Trendline0_data",
                "line0_allTrendlineData",
                "line0Trendline_highlightedData"
            ]
        );
        assert_eq!(
            serde_json::to_value(&data[2].transform).unwrap(),
            json!([
                {
                    "type": "lookup",
                    "from": "line0Trendline0_params",
                    "key": "keys",
                    "fields": ["series"],
                    "values": ["coef"]
                },
                {
                    "type": "formula",
                    "expr": "datum.coef[0] + exp(datum.coef[1] * datum.date)",
                    "as": "trendlineValue"
                }
            ])
        );
        assert_eq!(
            filter_expr(&data[4].transform),
            vec!["line0Trendline_hoveredId === datum.rscMarkId"]
        );
    }

    #[test]
    fn test_popover_highlight_filter() {
        let trendline = trendline(
            "average",
            vec![ChildElement::ChartPopover(ChartPopoverProps::default())],
        );
        let data = trendline_data(&line(ScaleType::Time), &[trendline]);
        assert_eq!(
            filter_expr(&data[2].transform),
            vec![
                "line0Trendline_selectedId === datum.rscMarkId || !line0Trendline_selectedId && line0Trendline_hoveredId === datum.rscMarkId"
            ]
        );
    }

    #[test]
    fn test_add_trendline_data_normalizes_once() {
        let mut data = crate::data::base_data();
        let trendlines = vec![trendline("linear", vec![]), trendline("power", vec![])];
        add_trendline_data(&mut data, &line(ScaleType::Time), &trendlines);
        add_trendline_data(&mut data, &line(ScaleType::Time), &trendlines);
        let table = &data[0];
        let normalized = table
            .transform
            .iter()
            .filter(|t| t.output_field() == Some("dateNormalized"))
            .count();
        assert_eq!(normalized, 1);
    }

    #[test]
    fn test_no_normalization_without_regression() {
        let mut data = crate::data::base_data();
        add_trendline_data(&mut data, &line(ScaleType::Time), &[trendline("average", vec![])]);
        assert_eq!(data[0].transform.len(), 1);
    }
}
