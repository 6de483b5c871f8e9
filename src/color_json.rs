//! Purpose: Render decode reports as pretty JSON with optional ANSI highlighting.
//! Exports: `colorize_report`.
//! Role: Small, pure formatter used by the CLI when stdout is a terminal.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: `success`/`failure` keys are tinted so captured failures stand out.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_LITERAL: &str = "35";
const COLOR_SUCCESS: &str = "1;32";
const COLOR_FAILURE: &str = "1;31";

struct Writer {
    use_color: bool,
    out: String,
}

pub fn colorize_report(value: &Value, use_color: bool) -> String {
    let mut writer = Writer {
        use_color,
        out: String::new(),
    };
    writer.value(value, 0);
    writer.out
}

impl Writer {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.token("null", COLOR_LITERAL),
            Value::Bool(flag) => self.token(if *flag { "true" } else { "false" }, COLOR_LITERAL),
            Value::Number(number) => self.token(&number.to_string(), COLOR_NUMBER),
            Value::String(text) => self.token(&encode(text), COLOR_STRING),
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push_str("[\n");
        for (idx, item) in items.iter().enumerate() {
            self.indent(depth + 1);
            self.value(item, depth + 1);
            self.separator(idx + 1 < items.len());
        }
        self.indent(depth);
        self.out.push(']');
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        for (idx, (key, value)) in map.iter().enumerate() {
            self.indent(depth + 1);
            let color = match key.as_str() {
                "success" => COLOR_SUCCESS,
                "failure" => COLOR_FAILURE,
                _ => COLOR_KEY,
            };
            self.token(&encode(key), color);
            self.out.push_str(": ");
            self.value(value, depth + 1);
            self.separator(idx + 1 < map.len());
        }
        self.indent(depth);
        self.out.push('}');
    }

    fn separator(&mut self, more: bool) {
        if more {
            self.out.push(',');
        }
        self.out.push('\n');
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn token(&mut self, text: &str, color: &str) {
        if self.use_color {
            self.out.push_str("\u{1b}[");
            self.out.push_str(color);
            self.out.push('m');
            self.out.push_str(text);
            self.out.push_str("\u{1b}[0m");
        } else {
            self.out.push_str(text);
        }
    }
}

fn encode(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
