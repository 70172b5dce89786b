use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One observed tool invocation, as emitted by an agent executor.
///
/// Events are created once per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallEvent {
    #[serde(alias = "toolName")]
    pub tool_name: String,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub input: Map<String, Value>,
    #[serde(default)]
    pub output: Value,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

impl ToolCallEvent {
    pub fn new(tool_name: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            input,
            output: Value::Null,
            success: true,
        }
    }

    pub fn with_output(mut self, output: Value, success: bool) -> Self {
        self.output = output;
        self.success = success;
        self
    }

    /// Flattened argument text used for purpose classification and traces.
    ///
    /// Prefers the conventional argument keys (`command`, `file_path`, ...) and
    /// falls back to the first string value, then to compact JSON.
    pub fn argument_text(&self) -> String {
        const PREFERRED: &[&str] = &[
            "command", "cmd", "file_path", "path", "pattern", "query", "url", "content",
        ];

        for key in PREFERRED {
            if let Some(val) = self.input.get(*key)
                && !val.is_null()
            {
                return value_text(val);
            }
        }

        if let Some(first) = self.input.values().find_map(|v| v.as_str()) {
            return first.to_string();
        }

        if self.input.is_empty() {
            String::new()
        } else {
            Value::Object(self.input.clone()).to_string()
        }
    }
}

fn value_text(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}
