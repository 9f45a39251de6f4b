//! Interaction-state signal builders.

use crate::constants::{MARK_ID, SERIES_ID};
use chartspec_vega::signal::Signal;
use chartspec_vega::Expr;
use serde_json::Value;

/// A signal that starts out `null` and is set from outside the spec
pub fn generic_signal<S: Into<String>>(name: S) -> Signal {
    Signal::new(name, Value::Null)
}

/// `<name>_hoveredId`: the mark id of the item under the pointer.
///
/// `nested_datum` is set when the hovered mark (e.g. a voronoi cell) wraps the
/// original row in its own datum.
pub fn uncontrolled_hover_signal(name: &str, nested_datum: bool, event_name: &str) -> Signal {
    hover_signal(format!("{name}_hoveredId"), MARK_ID, nested_datum, event_name)
}

/// `<name>_hoveredSeries`: the series id of the item under the pointer
pub fn series_hovered_signal(name: &str, nested_datum: bool, event_name: &str) -> Signal {
    hover_signal(format!("{name}_hoveredSeries"), SERIES_ID, nested_datum, event_name)
}

fn hover_signal(signal_name: String, field: &str, nested_datum: bool, event_name: &str) -> Signal {
    let update = if nested_datum {
        Expr::nested_datum(field)
    } else {
        Expr::datum(field)
    };
    generic_signal(signal_name)
        .on(format!("@{event_name}:mouseover"), update)
        .on(format!("@{event_name}:mouseout"), Expr::null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generic_signal() {
        assert_eq!(
            serde_json::to_value(generic_signal("line0Trendline_selectedId")).unwrap(),
            json!({"name": "line0Trendline_selectedId", "value": null})
        );
    }

    #[test]
    fn test_hover_signals() {
        let signal = uncontrolled_hover_signal("line0Trendline", true, "line0Trendline_voronoi");
        assert_eq!(
            serde_json::to_value(signal).unwrap(),
            json!({
                "name": "line0Trendline_hoveredId",
                "value": null,
                "on": [
                    {"events": "@line0Trendline_voronoi:mouseover", "update": "datum.datum.rscMarkId"},
                    {"events": "@line0Trendline_voronoi:mouseout", "update": "null"}
                ]
            })
        );

        let signal = series_hovered_signal("line0", false, "line0");
        assert_eq!(signal.name, "line0_hoveredSeries");
        assert_eq!(signal.on[0].update.render(), "datum.rscSeriesId");
    }
}
