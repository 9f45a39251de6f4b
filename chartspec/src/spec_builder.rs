use crate::color::color_value;
use crate::constants::BACKGROUND_COLOR;
use crate::data::base_data;
use crate::error::ChartSpecError;
use crate::props::{BarSpecProps, ChartProps, LineSpecProps, MarkProps};
use crate::{bar, line};
use chartspec_vega::signal::Signal;
use chartspec_vega::Spec;
use serde_json::Value;

/// Build the complete specification for a chart in a single pass.
///
/// Marks are added in declaration order. Any configuration error aborts the build.
#[tracing::instrument(skip_all, fields(marks = props.marks.len()))]
pub fn build_spec(props: &ChartProps) -> Result<Spec, ChartSpecError> {
    let mut spec = Spec {
        width: props.width,
        height: props.height,
        data: base_data(),
        signals: vec![Signal::new(
            BACKGROUND_COLOR,
            Value::from(color_value("gray-50", props.color_scheme)),
        )],
        ..Default::default()
    };

    for mark in &props.marks {
        match mark {
            // the color scheme is chart-wide, marks only carry it for their encodings
            MarkProps::Line(line_props) => {
                let line_props = LineSpecProps {
                    color_scheme: props.color_scheme,
                    ..line_props.clone()
                };
                line::add_line(&mut spec, &line_props)?;
            }
            MarkProps::Bar(bar_props) => {
                let bar_props = BarSpecProps {
                    color_scheme: props.color_scheme,
                    ..bar_props.clone()
                };
                bar::add_bar(&mut spec, &bar_props)?;
            }
        }
    }
    tracing::debug!(
        data = spec.data.len(),
        scales = spec.scales.len(),
        signals = spec.signals.len(),
        marks = spec.marks.len(),
        "built spec"
    );
    Ok(spec)
}

/// Deserialize a chart description and build its specification
pub fn build_spec_from_json(json: &str) -> Result<Spec, ChartSpecError> {
    let props: ChartProps = serde_json::from_str(json)?;
    build_spec(&props)
}
