use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartSpecError {
    #[error("Invalid polynomial order: `{0}`, order must be an integer greater than 0")]
    InvalidPolynomialOrder(String),

    #[error(
        "Invalid moving average frame width: `{0}`, frame width must be an integer greater than 0"
    )]
    InvalidMovingAverageWidth(String),

    #[error("Unknown trendline method: `{0}`")]
    UnknownTrendlineMethod(String),

    #[error("JSON error: `{0}`")]
    Json(#[from] serde_json::Error),
}
