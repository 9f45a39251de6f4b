//! Trendline defaults.
//!
//! Every trendline declared on a mark is normalized here exactly once; the
//! assemblers only ever see [`TrendlineSpecProps`].

use super::method::TrendlineMethod;
use crate::constants::TRENDLINE_VALUE;
use crate::error::ChartSpecError;
use crate::props::{ChildElement, LineType, LineTypeName, LineWidth, LineWidthName, TrendlineProps};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendlineSpecProps {
    /// `<markName>Trendline<index>`, prefix of every data source and mark this trendline adds
    pub name: String,
    pub method: TrendlineMethod,
    pub dimension_range: [Option<f64>; 2],
    /// Overrides the mark's color when set
    pub color: Option<String>,
    pub display_on_hover: bool,
    pub highlight_raw_point: bool,
    pub line_type: LineType,
    pub line_width: LineWidth,
    pub opacity: f64,
    /// Field the computed trendline value is written to
    pub metric: String,
    pub children: Vec<ChildElement>,
}

impl TrendlineSpecProps {
    /// Name of the data source the trendline's line is drawn from
    pub fn line_data_name(&self) -> String {
        if self.method.is_regression() {
            format!("{}_highResolutionData", self.name)
        } else {
            format!("{}_data", self.name)
        }
    }
}

pub fn apply_trendline_prop_defaults(
    props: &TrendlineProps,
    mark_name: &str,
    index: usize,
) -> Result<TrendlineSpecProps, ChartSpecError> {
    let method = match &props.method {
        Some(method) => method.parse::<TrendlineMethod>()?,
        None => TrendlineMethod::default(),
    };
    Ok(TrendlineSpecProps {
        name: format!("{mark_name}Trendline{index}"),
        method,
        dimension_range: props.dimension_range.unwrap_or([None, None]),
        color: props.color.clone(),
        display_on_hover: props.display_on_hover.unwrap_or(false),
        highlight_raw_point: props.highlight_raw_point.unwrap_or(false),
        line_type: props
            .line_type
            .clone()
            .unwrap_or(LineTypeName::Dashed.into()),
        line_width: props.line_width.unwrap_or(LineWidthName::M.into()),
        opacity: props.opacity.unwrap_or(1.0),
        metric: TRENDLINE_VALUE.to_string(),
        children: sanitize_trendline_children(&props.children),
    })
}

/// Normalized trendlines among a mark's children, indexed in declaration order
pub fn trendlines(
    children: &[ChildElement],
    mark_name: &str,
) -> Result<Vec<TrendlineSpecProps>, ChartSpecError> {
    children
        .iter()
        .filter_map(|child| match child {
            ChildElement::Trendline(props) => Some(props),
            _ => None,
        })
        .enumerate()
        .map(|(index, props)| apply_trendline_prop_defaults(props, mark_name, index))
        .collect()
}

/// Trendlines only support tooltips and popovers
pub fn sanitize_trendline_children(children: &[ChildElement]) -> Vec<ChildElement> {
    children
        .iter()
        .filter(|child| {
            matches!(
                child,
                ChildElement::ChartTooltip(_) | ChildElement::ChartPopover(_)
            )
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{ChartTooltipProps, MetricRangeProps};
    use std::num::NonZeroU32;

    #[test]
    fn test_defaults() {
        let trendline = apply_trendline_prop_defaults(&TrendlineProps::default(), "line0", 0).unwrap();
        assert_eq!(
            trendline,
            TrendlineSpecProps {
                name: "line0Trendline0".to_string(),
                method: TrendlineMethod::Linear,
                dimension_range: [None, None],
                color: None,
                display_on_hover: false,
                highlight_raw_point: false,
                line_type: LineTypeName::Dashed.into(),
                line_width: LineWidthName::M.into(),
                opacity: 1.0,
                metric: "trendlineValue".to_string(),
                children: vec![],
            }
        );
        assert_eq!(trendline.line_data_name(), "line0Trendline0_highResolutionData");
    }

    #[test]
    fn test_explicit_values_kept() {
        let props = TrendlineProps {
            method: Some("movingAverage-3".to_string()),
            dimension_range: Some([Some(1.0), None]),
            color: Some("gray-700".to_string()),
            opacity: Some(0.5),
            display_on_hover: Some(true),
            ..Default::default()
        };
        let trendline = apply_trendline_prop_defaults(&props, "bar0", 2).unwrap();
        assert_eq!(trendline.name, "bar0Trendline2");
        assert_eq!(
            trendline.method,
            TrendlineMethod::MovingAverage(NonZeroU32::new(3).unwrap())
        );
        assert_eq!(trendline.dimension_range, [Some(1.0), None]);
        assert_eq!(trendline.color.as_deref(), Some("gray-700"));
        assert!(trendline.display_on_hover);
        assert_eq!(trendline.line_data_name(), "bar0Trendline2_data");
    }

    #[test]
    fn test_invalid_method_fails() {
        let props = TrendlineProps {
            method: Some("polynomial-0".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            apply_trendline_prop_defaults(&props, "line0", 0),
            Err(ChartSpecError::InvalidPolynomialOrder(_))
        ));
    }

    #[test]
    fn test_trendlines_index_and_sanitize() {
        let children = vec![
            ChildElement::ChartTooltip(ChartTooltipProps::default()),
            ChildElement::Trendline(TrendlineProps {
                children: vec![
                    ChildElement::ChartTooltip(ChartTooltipProps::default()),
                    ChildElement::MetricRange(MetricRangeProps::default()),
                    ChildElement::Trendline(TrendlineProps::default()),
                ],
                ..Default::default()
            }),
            ChildElement::Trendline(TrendlineProps::default()),
        ];
        let trendlines = trendlines(&children, "line0").unwrap();
        let names = trendlines.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["line0Trendline0", "line0Trendline1"]);
        assert_eq!(
            trendlines[0].children,
            vec![ChildElement::ChartTooltip(ChartTooltipProps::default())]
        );
    }
}
