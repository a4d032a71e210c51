use super::outcome::{Outcome, Phase};
use crate::reporter::serialize::text;
use serde_derive::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A test as seen by the runner at collection time.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CollectedItem {
    pub node_id: String,
    #[serde(default)]
    pub params: HashMap<String, Value>,
}

/// Result of one phase of one test.
#[derive(Debug, Deserialize, Clone, PartialEq, Builder)]
#[builder(setter(into))]
pub struct TestReport {
    pub node_id: String,
    #[serde(default, rename = "when")]
    #[builder(default)]
    pub phase: Phase,
    pub outcome: Outcome,
    #[serde(default)]
    #[builder(default)]
    pub duration: f64,
    /// Skip produced by an expected-failure marker.
    #[serde(default)]
    #[builder(default)]
    pub xfail: bool,
}

impl CollectedItem {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            params: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parameter value as text. Non-string values use their literal form.
    pub fn param(&self, key: &str) -> Option<String> {
        self.params.get(key).map(text::param)
    }
}

impl TestReport {
    pub fn builder() -> TestReportBuilder {
        TestReportBuilder::default()
    }

    /// Only the test body phase is reported to the tracker.
    pub fn is_call(&self) -> bool {
        self.phase == Phase::Call
    }
}
