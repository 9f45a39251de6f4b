use super::data::trendline_dimension;
use super::props::TrendlineSpecProps;
use crate::constants::{FILTERED_TABLE, LINEAR_PADDING, TRENDLINE_X_SCALE};
use crate::props::PrimaryMarkProps;
use chartspec_vega::scale::{Scale, ScaleRange, ScaleType};

/// Regressions on a time axis are fit against the normalized dimension, which
/// needs its own linear x scale.
pub fn trendline_scales<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendlines: &[TrendlineSpecProps],
) -> Vec<Scale> {
    if trendlines.is_empty() || !mark.has_time_scale() {
        return Vec::new();
    }
    vec![Scale::new(TRENDLINE_X_SCALE, ScaleType::Linear)
        .range(ScaleRange::Named("width".to_string()))
        .domain(FILTERED_TABLE, vec![trendline_dimension(mark)])
        .padding(LINEAR_PADDING)
        .zero(false)
        .nice(false)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{BarSpecProps, ChildElement, LineSpecProps, TrendlineProps};
    use crate::trendline::props::trendlines;
    use serde_json::json;

    #[test]
    fn test_time_scale_adds_trendline_scale() {
        let line = LineSpecProps {
            children: vec![ChildElement::Trendline(TrendlineProps::default())],
            ..Default::default()
        };
        let trendlines = trendlines(&line.children, &line.name).unwrap();
        assert_eq!(
            serde_json::to_value(trendline_scales(&line, &trendlines)).unwrap(),
            json!([{
                "name": "xTrendline",
                "type": "linear",
                "range": "width",
                "domain": {"data": "filteredTable", "fields": ["datetimeNormalized"]},
                "padding": 32.0,
                "zero": false,
                "nice": false
            }])
        );
        assert!(trendline_scales(&line, &[]).is_empty());
    }

    #[test]
    fn test_non_time_scales_add_nothing() {
        let bar = BarSpecProps {
            children: vec![ChildElement::Trendline(TrendlineProps::default())],
            ..Default::default()
        };
        let trendlines = trendlines(&bar.children, &bar.name).unwrap();
        assert!(trendline_scales(&bar, &trendlines).is_empty());
    }
}
