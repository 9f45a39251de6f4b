//! Named palette colors and their values per color scheme.

use crate::props::ColorScheme;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// name -> (light, dark)
    static ref NAMED_COLORS: HashMap<&'static str, (&'static str, &'static str)> = HashMap::from([
        ("gray-50", ("rgb(255, 255, 255)", "rgb(29, 29, 29)")),
        ("gray-75", ("rgb(253, 253, 253)", "rgb(38, 38, 38)")),
        ("gray-100", ("rgb(248, 248, 248)", "rgb(50, 50, 50)")),
        ("gray-200", ("rgb(230, 230, 230)", "rgb(63, 63, 63)")),
        ("gray-300", ("rgb(213, 213, 213)", "rgb(84, 84, 84)")),
        ("gray-400", ("rgb(177, 177, 177)", "rgb(112, 112, 112)")),
        ("gray-500", ("rgb(144, 144, 144)", "rgb(144, 144, 144)")),
        ("gray-600", ("rgb(109, 109, 109)", "rgb(178, 178, 178)")),
        ("gray-700", ("rgb(70, 70, 70)", "rgb(209, 209, 209)")),
        ("gray-800", ("rgb(34, 34, 34)", "rgb(235, 235, 235)")),
        ("gray-900", ("rgb(0, 0, 0)", "rgb(255, 255, 255)")),
        ("static-blue", ("rgb(20, 115, 230)", "rgb(20, 115, 230)")),
        ("blue-500", ("rgb(64, 105, 253)", "rgb(64, 105, 253)")),
        ("red-500", ("rgb(240, 56, 35)", "rgb(240, 56, 35)")),
        ("green-500", ("rgb(7, 147, 85)", "rgb(21, 164, 110)")),
        ("categorical-100", ("rgb(15, 181, 174)", "rgb(15, 181, 174)")),
        ("categorical-200", ("rgb(64, 70, 202)", "rgb(64, 70, 202)")),
        ("categorical-300", ("rgb(246, 133, 17)", "rgb(246, 133, 17)")),
        ("categorical-400", ("rgb(222, 61, 130)", "rgb(222, 61, 130)")),
        ("categorical-500", ("rgb(126, 132, 250)", "rgb(126, 132, 250)")),
        ("categorical-600", ("rgb(114, 224, 106)", "rgb(114, 224, 106)")),
    ]);
}

/// Categorical palette used for the color scale range, in order
pub const CATEGORICAL_COLORS: [&str; 6] = [
    "categorical-100",
    "categorical-200",
    "categorical-300",
    "categorical-400",
    "categorical-500",
    "categorical-600",
];

/// Resolve a named palette color for the scheme; any other string is passed through.
pub fn color_value(color: &str, color_scheme: ColorScheme) -> String {
    match NAMED_COLORS.get(color) {
        Some((light, dark)) => match color_scheme {
            ColorScheme::Light => light.to_string(),
            ColorScheme::Dark => dark.to_string(),
        },
        None => color.to_string(),
    }
}
