use crate::error::ChartSpecError;
use chartspec_vega::data::RegressionMethod;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// How a trendline summarizes its mark's data.
///
/// Parsed once from strings such as `linear`, `polynomial-3` or `movingAverage-7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrendlineMethod {
    Average,
    #[default]
    Linear,
    Quadratic,
    Polynomial(NonZeroU32),
    Exponential,
    Logarithmic,
    Power,
    MovingAverage(NonZeroU32),
}

impl TrendlineMethod {
    /// Linear, quadratic and any polynomial fit
    pub fn is_polynomial(&self) -> bool {
        matches!(
            self,
            TrendlineMethod::Linear | TrendlineMethod::Quadratic | TrendlineMethod::Polynomial(_)
        )
    }

    /// Methods fitted with a regression over the dimension
    pub fn is_regression(&self) -> bool {
        self.is_polynomial()
            || matches!(
                self,
                TrendlineMethod::Exponential | TrendlineMethod::Logarithmic | TrendlineMethod::Power
            )
    }

    pub fn is_window(&self) -> bool {
        matches!(self, TrendlineMethod::MovingAverage(_))
    }

    pub fn polynomial_order(&self) -> Option<u32> {
        match self {
            TrendlineMethod::Linear => Some(1),
            TrendlineMethod::Quadratic => Some(2),
            TrendlineMethod::Polynomial(order) => Some(order.get()),
            _ => None,
        }
    }

    pub fn window_width(&self) -> Option<u32> {
        match self {
            TrendlineMethod::MovingAverage(width) => Some(width.get()),
            _ => None,
        }
    }

    /// Regression kind for the regression transform; polynomials always use `poly`
    /// so that the order is explicit.
    pub fn regression_method(&self) -> Option<RegressionMethod> {
        match self {
            m if m.is_polynomial() => Some(RegressionMethod::Poly),
            TrendlineMethod::Exponential => Some(RegressionMethod::Exp),
            TrendlineMethod::Logarithmic => Some(RegressionMethod::Log),
            TrendlineMethod::Power => Some(RegressionMethod::Pow),
            _ => None,
        }
    }
}

fn parse_positive(value: &str) -> Option<NonZeroU32> {
    value.parse::<u32>().ok().and_then(NonZeroU32::new)
}

impl FromStr for TrendlineMethod {
    type Err = ChartSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(order) = s.strip_prefix("polynomial-") {
            return parse_positive(order)
                .map(TrendlineMethod::Polynomial)
                .ok_or_else(|| ChartSpecError::InvalidPolynomialOrder(s.to_string()));
        }
        if let Some(width) = s.strip_prefix("movingAverage-") {
            return parse_positive(width)
                .map(TrendlineMethod::MovingAverage)
                .ok_or_else(|| ChartSpecError::InvalidMovingAverageWidth(s.to_string()));
        }
        match s {
            "average" => Ok(TrendlineMethod::Average),
            "linear" => Ok(TrendlineMethod::Linear),
            "quadratic" => Ok(TrendlineMethod::Quadratic),
            "exponential" => Ok(TrendlineMethod::Exponential),
            "logarithmic" => Ok(TrendlineMethod::Logarithmic),
            "power" => Ok(TrendlineMethod::Power),
            _ => Err(ChartSpecError::UnknownTrendlineMethod(s.to_string())),
        }
    }
}

impl TryFrom<&str> for TrendlineMethod {
    type Error = ChartSpecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TrendlineMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendlineMethod::Average => write!(f, "average"),
            TrendlineMethod::Linear => write!(f, "linear"),
            TrendlineMethod::Quadratic => write!(f, "quadratic"),
            TrendlineMethod::Polynomial(order) => write!(f, "polynomial-{order}"),
            TrendlineMethod::Exponential => write!(f, "exponential"),
            TrendlineMethod::Logarithmic => write!(f, "logarithmic"),
            TrendlineMethod::Power => write!(f, "power"),
            TrendlineMethod::MovingAverage(width) => write!(f, "movingAverage-{width}"),
        }
    }
}
