// Shared names and defaults for chartspec

// Data sources every chart starts with
pub const TABLE: &str = "table";
pub const FILTERED_TABLE: &str = "filteredTable";

// Fields written by the builder's own transforms
pub const MARK_ID: &str = "rscMarkId";
pub const SERIES_ID: &str = "rscSeriesId";
pub const TRENDLINE_VALUE: &str = "trendlineValue";
pub const DEFAULT_TRANSFORMED_TIME_DIMENSION: &str = "datetime0";

// Scale names
pub const COLOR_SCALE: &str = "color";
pub const MULTI_COLOR_SCALE: &str = "colors";
pub const SECONDARY_COLOR_SCALE: &str = "secondaryColor";
pub const LINE_TYPE_SCALE: &str = "lineType";
pub const LINE_WIDTH_SCALE: &str = "lineWidth";
pub const OPACITY_SCALE: &str = "opacity";
pub const Y_LINEAR_SCALE: &str = "yLinear";
pub const TRENDLINE_X_SCALE: &str = "xTrendline";

// Signal holding the chart background color
pub const BACKGROUND_COLOR: &str = "backgroundColor";

pub const MS_PER_DAY: f64 = 86_400_000.0;
pub const LINEAR_PADDING: f64 = 32.0;
pub const BAR_PADDING: f64 = 0.4;

// Ratio by which non-highlighted items are faded
pub const HIGHLIGHT_CONTRAST_RATIO: f64 = 5.0;

// Symbol sizing for hover and selection points
pub const DEFAULT_SYMBOL_SIZE: f64 = 100.0;
pub const DEFAULT_SYMBOL_STROKE_WIDTH: f64 = 2.0;
pub const STATIC_POINT_SIZE: f64 = 64.0;
pub const STATIC_POINT_STROKE_WIDTH: f64 = 6.0;
pub const SELECT_RING_SIZE: f64 = 196.0;
