use super::props::TrendlineSpecProps;
use crate::encoding::{has_popover, has_tooltip};
use crate::props::PrimaryMarkProps;
use crate::signals::{generic_signal, series_hovered_signal, uncontrolled_hover_signal};
use chartspec_vega::signal::Signal;

/// Interaction state the trendlines of a mark read
pub fn trendline_signals<M: PrimaryMarkProps + ?Sized>(
    mark: &M,
    trendlines: &[TrendlineSpecProps],
) -> Vec<Signal> {
    let mark_name = mark.name();
    let trendline_name = format!("{mark_name}Trendline");
    let mut signals = Vec::new();

    if trendlines.iter().any(|t| has_tooltip(&t.children)) {
        let voronoi = format!("{trendline_name}_voronoi");
        signals.push(uncontrolled_hover_signal(&trendline_name, true, &voronoi));
        signals.push(series_hovered_signal(&trendline_name, true, &voronoi));
    }

    // hover-only trendlines follow the series hovered on the mark itself
    if trendlines.iter().any(|t| t.display_on_hover) {
        signals.push(series_hovered_signal(
            mark_name,
            true,
            &format!("{mark_name}_voronoi"),
        ));
    }

    if trendlines.iter().any(|t| has_popover(&t.children)) {
        signals.push(generic_signal(format!("{trendline_name}_selectedId")));
        signals.push(generic_signal(format!("{trendline_name}_selectedSeries")));
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{
        ChartPopoverProps, ChartTooltipProps, ChildElement, LineSpecProps, TrendlineProps,
    };
    use crate::trendline::props::trendlines;
    use rstest::rstest;

    fn signal_names(trendline: TrendlineProps) -> Vec<String> {
        let line = LineSpecProps {
            children: vec![ChildElement::Trendline(trendline)],
            ..Default::default()
        };
        let trendlines = trendlines(&line.children, &line.name).unwrap();
        trendline_signals(&line, &trendlines)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[rstest]
    #[case(TrendlineProps::default(), vec![])]
    #[case(
        TrendlineProps {
            children: vec![ChildElement::ChartTooltip(ChartTooltipProps::default())],
            ..Default::default()
        },
        vec!["line0Trendline_hoveredId", "line0Trendline_hoveredSeries"]
    )]
    #[case(
        TrendlineProps { display_on_hover: Some(true), ..Default::default() },
        vec!["line0_hoveredSeries"]
    )]
    #[case(
        TrendlineProps {
            children: vec![ChildElement::ChartPopover(ChartPopoverProps::default())],
            ..Default::default()
        },
        vec!["line0Trendline_selectedId", "line0Trendline_selectedSeries"]
    )]
    fn test_trendline_signals(#[case] trendline: TrendlineProps, #[case] expected: Vec<&str>) {
        assert_eq!(signal_names(trendline), expected);
    }
}
