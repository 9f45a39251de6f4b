pub mod axis;
pub mod bar;
pub mod color;
pub mod constants;
pub mod data;
pub mod encoding;
pub mod error;
pub mod facet;
pub mod line;
pub mod props;
pub mod scale;
pub mod signals;
pub mod spec_builder;
pub mod trendline;

pub use error::ChartSpecError;
pub use props::ChartProps;
pub use spec_builder::{build_spec, build_spec_from_json};
