//! Axis label helpers.

use chartspec_vega::marks::{Encode, EncodeEntry, ValueRef};
use chartspec_vega::Expr;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, VariantNames};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Position::Left | Position::Right)
    }
}

/// Author-facing label alignment along the axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LabelAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaselineAlign {
    Align(Align),
    Baseline(Baseline),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LabelFormat {
    Linear,
    Percentage,
}

/// Which text of a custom label to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum LabelKey {
    Label,
    SubLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    Number(f64),
    Text(String),
}

/// Custom label for one axis value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelProps {
    pub value: LabelValue,
    pub label: Option<String>,
    pub sub_label: Option<String>,
    pub align: Option<LabelAlign>,
    pub font_weight: Option<FontWeight>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Detailed(LabelProps),
    Value(LabelValue),
}

/// Tick interval of a time axis, either a named unit or a unit with a step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TickCount {
    Interval(&'static str),
    Step { interval: &'static str, step: u32 },
}

/// The axis value a label is attached to
pub fn label_value(label: &Label) -> &LabelValue {
    match label {
        Label::Detailed(props) => &props.value,
        Label::Value(value) => value,
    }
}

/// `(secondary format, primary format, tick count)` for a time granularity
pub fn time_label_formats(granularity: Granularity) -> (&'static str, &'static str, TickCount) {
    match granularity {
        Granularity::Minute => ("%-I:%M %p", "%b %-d", TickCount::Interval("minute")),
        Granularity::Hour => ("%-I %p", "%b %-d", TickCount::Interval("hour")),
        Granularity::Day => ("%-d", "%b", TickCount::Interval("day")),
        Granularity::Week => ("%-d", "%b", TickCount::Interval("week")),
        Granularity::Month => ("%b", "%Y", TickCount::Interval("month")),
        Granularity::Quarter => (
            "Q%q",
            "%Y",
            TickCount::Step {
                interval: "month",
                step: 3,
            },
        ),
    }
}

/// Horizontal axes align their labels, vertical axes set the baseline
pub fn label_baseline_align(
    label_align: Option<LabelAlign>,
    position: Position,
) -> Option<BaselineAlign> {
    if position.is_vertical() {
        label_baseline(label_align, position, None).map(BaselineAlign::Baseline)
    } else {
        label_align_for(label_align, position, None).map(BaselineAlign::Align)
    }
}

/// Text alignment of labels on a horizontal axis; an explicit grammar value wins
pub fn label_align_for(
    label_align: Option<LabelAlign>,
    position: Position,
    explicit: Option<Align>,
) -> Option<Align> {
    if explicit.is_some() {
        return explicit;
    }
    if position.is_vertical() {
        return None;
    }
    Some(match label_align? {
        LabelAlign::Start => Align::Left,
        LabelAlign::Center => Align::Center,
        LabelAlign::End => Align::Right,
    })
}

/// Text baseline of labels on a vertical axis; an explicit grammar value wins
pub fn label_baseline(
    label_align: Option<LabelAlign>,
    position: Position,
    explicit: Option<Baseline>,
) -> Option<Baseline> {
    if explicit.is_some() {
        return explicit;
    }
    if !position.is_vertical() {
        return None;
    }
    Some(match label_align? {
        LabelAlign::Start => Baseline::Top,
        LabelAlign::Center => Baseline::Middle,
        LabelAlign::End => Baseline::Bottom,
    })
}

/// Shifts band scale labels to the start or end of their band
pub fn label_offset(
    label_align: LabelAlign,
    scale_name: &str,
    explicit: Option<ValueRef>,
) -> Option<ValueRef> {
    if explicit.is_some() {
        return explicit;
    }
    let half_band = |divisor: f64| {
        ValueRef::signal(Expr::call("bandwidth", [Expr::str(scale_name)]) / Expr::num(divisor))
    };
    match label_align {
        LabelAlign::Start => Some(half_band(-2.0)),
        LabelAlign::End => Some(half_band(2.0)),
        LabelAlign::Center => None,
    }
}

fn datum_value() -> Expr {
    Expr::datum("value")
}

fn is_number() -> Expr {
    Expr::call("isNumber", [datum_value()])
}

/// Label text rules. Percentages are formatted as such; numbers of 1000 and up are
/// abbreviated with SI suffixes, using `B` for billions.
pub fn label_format(format: Option<LabelFormat>) -> Vec<ValueRef> {
    let fallback = ValueRef::signal(datum_value());
    if format == Some(LabelFormat::Percentage) {
        return vec![
            ValueRef::signal(Expr::call("format", [datum_value(), Expr::str("~%")]))
                .with_test(is_number()),
            fallback,
        ];
    }
    let abbreviated = Expr::call(
        "upper",
        [Expr::call(
            "replace",
            [
                Expr::call("format", [datum_value(), Expr::str(".3~s")]),
                Expr::str("G"),
                Expr::str("B"),
            ],
        )],
    );
    vec![
        ValueRef::signal(abbreviated).with_test(
            is_number().and(Expr::call("abs", [datum_value()]).gte(Expr::num(1000.0))),
        ),
        fallback,
    ]
}

fn label_index(signal_name: &str) -> Expr {
    Expr::call(
        "indexof",
        [
            Expr::call("pluck", [Expr::signal(signal_name), Expr::str("value")]),
            datum_value(),
        ],
    )
}

fn has_custom_label(signal_name: &str) -> Expr {
    label_index(signal_name).strict_ne(Expr::num(-1.0))
}

/// `<signal>[<index of this value>].<property>`
fn custom_label_property(signal_name: &str, property: &str) -> Expr {
    Expr::signal(signal_name)
        .index(label_index(signal_name))
        .member(property)
}

/// Update encoding for axis labels that can be overridden per value through the
/// labels array held in `signal_name`.
pub fn axis_labels_encoding(
    label_align: LabelAlign,
    font_weight: FontWeight,
    label_key: LabelKey,
    position: Position,
    signal_name: &str,
) -> Encode {
    let mut encode = Encode::default()
        .update(
            "text",
            vec![
                ValueRef::signal(custom_label_property(signal_name, &label_key.to_string()))
                    .with_test(has_custom_label(signal_name)),
                ValueRef::signal(datum_value()),
            ],
        )
        .update(
            "fontWeight",
            vec![
                ValueRef::signal(custom_label_property(signal_name, "fontWeight")).with_test(
                    has_custom_label(signal_name)
                        .and(custom_label_property(signal_name, "fontWeight")),
                ),
                ValueRef::value(font_weight.to_string()),
            ],
        );
    encode
        .update
        .extend(encoded_label_baseline_align(position, signal_name, label_align));
    encode
}

/// `align` for horizontal axes or `baseline` for vertical axes, preferring the
/// alignment of a custom label.
pub fn encoded_label_baseline_align(
    position: Position,
    signal_name: &str,
    default_label_align: LabelAlign,
) -> EncodeEntry {
    let custom = ValueRef::signal(custom_label_property(signal_name, "align")).with_test(
        has_custom_label(signal_name).and(custom_label_property(signal_name, "align")),
    );
    let (channel, default) = match label_baseline_align(Some(default_label_align), position) {
        Some(BaselineAlign::Align(align)) => ("align", json!(align.to_string())),
        Some(BaselineAlign::Baseline(baseline)) => ("baseline", json!(baseline.to_string())),
        None => (
            if position.is_vertical() { "baseline" } else { "align" },
            Value::Null,
        ),
    };
    let mut entry = EncodeEntry::new();
    entry.insert(channel.to_string(), vec![custom, ValueRef::value(default)].into());
    entry
}
