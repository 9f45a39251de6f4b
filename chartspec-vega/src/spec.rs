use crate::data::Data;
use crate::marks::Mark;
use crate::scale::Scale;
use crate::signal::Signal;
use serde::Serialize;

pub const VEGA_SCHEMA_URL: &str = "https://vega.github.io/schema/vega/v5.json";

/// The complete specification document handed to the rendering engine.
///
/// Emission order inside each collection is significant: data sources must follow
/// the sources they read from and later marks render on top of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spec {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub data: Vec<Data>,
    pub scales: Vec<Scale>,
    pub signals: Vec<Signal>,
    pub marks: Vec<Mark>,
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            schema: VEGA_SCHEMA_URL.to_string(),
            width: None,
            height: None,
            data: Vec::new(),
            scales: Vec::new(),
            signals: Vec::new(),
            marks: Vec::new(),
        }
    }
}

impl Spec {
    pub fn data(&self, name: &str) -> Option<&Data> {
        self.data.iter().find(|d| d.name == name)
    }

    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.name == name)
    }

    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Depth-first search through nested group marks
    pub fn mark(&self, name: &str) -> Option<&Mark> {
        self.marks.iter().find_map(|m| m.find(name))
    }

    /// Append scales, skipping any whose name is already taken
    pub fn extend_scales<I: IntoIterator<Item = Scale>>(&mut self, scales: I) {
        for scale in scales {
            if self.scale(&scale.name).is_none() {
                self.scales.push(scale);
            }
        }
    }

    /// Append signals, skipping any whose name is already taken
    pub fn extend_signals<I: IntoIterator<Item = Signal>>(&mut self, signals: I) {
        for signal in signals {
            if self.signal(&signal.name).is_none() {
                self.signals.push(signal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleType;
    use serde_json::json;

    #[test]
    fn test_extend_scales_keeps_first() {
        let mut spec = Spec::default();
        spec.extend_scales([
            Scale::new("yLinear", ScaleType::Linear).zero(true),
            Scale::new("yLinear", ScaleType::Linear).zero(false),
        ]);
        assert_eq!(spec.scales.len(), 1);
        assert_eq!(spec.scales[0].zero, Some(true));
    }

    #[test]
    fn test_serializes_schema_and_empty_collections() {
        let value = serde_json::to_value(Spec::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "$schema": VEGA_SCHEMA_URL,
                "data": [],
                "scales": [],
                "signals": [],
                "marks": []
            })
        );
    }
}
