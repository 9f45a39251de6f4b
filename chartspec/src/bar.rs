use crate::constants::{FILTERED_TABLE, SERIES_ID, Y_LINEAR_SCALE};
use crate::data::{has_output_field, series_id_transform, table_data_mut};
use crate::encoding::color_production_rule;
use crate::error::ChartSpecError;
use crate::props::{BarSpecProps, PrimaryMarkProps, ScaleType};
use crate::scale::{color_scales, dimension_scale, metric_scale, x_scale_name};
use crate::trendline::add_trendlines;
use chartspec_vega::marks::{Encode, Mark, ValueRef};
use chartspec_vega::Spec;
use serde_json::json;

/// Append a vertical bar mark on a band scale, followed by its trendlines.
#[tracing::instrument(skip_all, fields(name = %props.name))]
pub fn add_bar(spec: &mut Spec, props: &BarSpecProps) -> Result<(), ChartSpecError> {
    let table = table_data_mut(&mut spec.data);
    if !has_output_field(&table.transform, SERIES_ID) {
        table
            .transform
            .extend(series_id_transform(&props.facets().facets));
    }

    spec.extend_scales(
        [
            dimension_scale(ScaleType::Band, &props.dimension),
            metric_scale(&props.metric),
        ]
        .into_iter()
        .chain(color_scales(&props.color, props.color_scheme)),
    );

    let x_scale = x_scale_name(ScaleType::Band);
    spec.marks.push(
        Mark::rect(props.name.as_str())
            .from_data(FILTERED_TABLE)
            .encode(
                Encode::default()
                    .enter("fill", color_production_rule(&props.color, props.color_scheme))
                    .update("x", ValueRef::scaled(x_scale, props.dimension.as_str()))
                    .update(
                        "width",
                        ValueRef {
                            scale: Some(x_scale.to_string()),
                            band: Some(1.0),
                            ..Default::default()
                        },
                    )
                    .update("y", ValueRef::scaled(Y_LINEAR_SCALE, props.metric.as_str()))
                    .update(
                        "y2",
                        ValueRef {
                            scale: Some(Y_LINEAR_SCALE.to_string()),
                            value: Some(json!(0)),
                            ..Default::default()
                        },
                    ),
            ),
    );

    add_trendlines(spec, props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::base_data;
    use crate::props::{ChildElement, TrendlineProps};
    use serde_json::json;

    #[test]
    fn test_add_bar() {
        let mut spec = Spec {
            data: base_data(),
            ..Default::default()
        };
        add_bar(&mut spec, &BarSpecProps::default()).unwrap();

        let scale_names = spec.scales.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(scale_names, vec!["xBand", "yLinear", "color"]);
        assert_eq!(
            serde_json::to_value(&spec.marks[0].encode).unwrap()["update"]["y2"],
            json!({"scale": "yLinear", "value": 0})
        );
    }

    #[test]
    fn test_bar_trendline_has_no_time_normalization() {
        let mut spec = Spec {
            data: base_data(),
            ..Default::default()
        };
        let props = BarSpecProps {
            children: vec![ChildElement::Trendline(TrendlineProps::default())],
            ..Default::default()
        };
        add_bar(&mut spec, &props).unwrap();

        assert!(spec.data("bar0Trendline0_highResolutionData").is_some());
        assert!(spec.scale("xTrendline").is_none());
        let table = spec.data("table").unwrap();
        assert!(table
            .transform
            .iter()
            .all(|t| t.output_field() != Some("categoryNormalized")));
        assert_eq!(spec.marks[1].name, "bar0Trendline0_group");
    }
}
