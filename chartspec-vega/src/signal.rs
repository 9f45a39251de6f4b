use crate::expr::Expr;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEvent {
    pub events: String,
    pub update: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub name: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub on: Vec<SignalEvent>,
}

impl Signal {
    pub fn new<S: Into<String>>(name: S, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            on: Vec::new(),
        }
    }

    pub fn on<S: Into<String>>(mut self, events: S, update: Expr) -> Self {
        self.on.push(SignalEvent {
            events: events.into(),
            update,
        });
        self
    }
}
