//! Trendlines summarizing a line or bar mark.
//!
//! A build pass normalizes the trendlines declared on a mark once, then the data,
//! mark, scale and signal assemblers each append their part to the spec in that order.

pub mod data;
pub mod marks;
pub mod method;
pub mod props;
pub mod scales;
pub mod signals;

pub use method::TrendlineMethod;
pub use props::{trendlines, TrendlineSpecProps};

use crate::error::ChartSpecError;
use crate::props::PrimaryMarkProps;
use chartspec_vega::Spec;

/// Append everything the trendlines of `mark` need
#[tracing::instrument(skip_all, fields(mark = mark.name()))]
pub fn add_trendlines<M: PrimaryMarkProps + ?Sized>(
    spec: &mut Spec,
    mark: &M,
) -> Result<(), ChartSpecError> {
    let trendlines = trendlines(mark.children(), mark.name())?;
    if trendlines.is_empty() {
        return Ok(());
    }
    tracing::debug!("adding {} trendline(s)", trendlines.len());

    data::add_trendline_data(&mut spec.data, mark, &trendlines);
    spec.marks.extend(marks::trendline_marks(mark, &trendlines));
    spec.extend_scales(scales::trendline_scales(mark, &trendlines));
    spec.extend_signals(signals::trendline_signals(mark, &trendlines));
    Ok(())
}
