use crate::core::OrderStatus;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Path under which errors about the payload as a whole are reported.
pub const ROOT_PATH: &str = "_errors";

/// Field path (`products.0.quantity`) to the messages raised for that field.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, path: &str, message: impl Into<String>) {
        let path = if path.is_empty() { ROOT_PATH } else { path };
        self.0
            .entry(path.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub fn child_path(parent: &str, key: impl std::fmt::Display) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn status_options() -> String {
    OrderStatus::ALL
        .iter()
        .map(|status| format!("'{}'", status.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Collects every constraint failure while a payload is walked.
///
/// Each check returns the typed value when it passes, `None` otherwise, so a schema
/// can keep checking the remaining fields and report all failures at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn present(&mut self, path: &str, value: Option<&Value>) -> bool {
        if value.is_none() {
            self.errors.add(path, "Required");
            return false;
        }
        true
    }

    pub fn object<'v>(&mut self, path: &str, value: Option<&'v Value>) -> Option<&'v Map<String, Value>> {
        if !self.present(path, value) {
            return None;
        }
        match value {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                self.errors
                    .add(path, format!("Expected object, received {}", received(other)));
                None
            }
            None => None,
        }
    }

    fn string_value(&mut self, path: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.errors
                    .add(path, format!("Expected string, received {}", received(other)));
                None
            }
        }
    }

    /// Required string of at least one character.
    pub fn non_empty_string(&mut self, path: &str, value: Option<&Value>, empty_message: &str) -> Option<String> {
        if !self.present(path, value) {
            return None;
        }
        let s = self.string_value(path, value?)?;
        if s.is_empty() {
            self.errors.add(path, empty_message);
            return None;
        }
        Some(s)
    }

    pub fn optional_string(&mut self, path: &str, value: Option<&Value>) -> Option<String> {
        self.string_value(path, value?)
    }

    pub fn positive_integer(&mut self, path: &str, value: Option<&Value>, message: &str) -> Option<u32> {
        if !self.present(path, value) {
            return None;
        }
        let n = match value? {
            Value::Number(n) => n.as_f64()?,
            other => {
                self.errors
                    .add(path, format!("Expected number, received {}", received(other)));
                return None;
            }
        };
        let mut valid = true;
        if n.fract() != 0.0 {
            self.errors.add(path, "Expected integer, received float");
            valid = false;
        }
        if n <= 0.0 {
            self.errors.add(path, message);
            valid = false;
        }
        if n > f64::from(u32::MAX) {
            self.errors
                .add(path, format!("Number must be less than or equal to {}", u32::MAX));
            valid = false;
        }
        // `n` is integral and within range here, the cast is exact.
        valid.then_some(n as u32)
    }

    pub fn positive_number(&mut self, path: &str, value: Option<&Value>, message: &str) -> Option<f64> {
        if !self.present(path, value) {
            return None;
        }
        match value? {
            Value::Number(n) => {
                let n = n.as_f64()?;
                if n <= 0.0 {
                    self.errors.add(path, message);
                    return None;
                }
                Some(n)
            }
            other => {
                self.errors
                    .add(path, format!("Expected number, received {}", received(other)));
                None
            }
        }
    }

    pub fn optional_positive_number(&mut self, path: &str, value: Option<&Value>) -> Option<f64> {
        if value.is_none() {
            return None;
        }
        self.positive_number(path, value, "Number must be greater than 0")
    }

    /// Required array holding at least one element.
    pub fn non_empty_array<'v>(
        &mut self,
        path: &str,
        value: Option<&'v Value>,
        empty_message: &str,
    ) -> Option<&'v [Value]> {
        if !self.present(path, value) {
            return None;
        }
        match value? {
            Value::Array(items) if items.is_empty() => {
                self.errors.add(path, empty_message);
                None
            }
            Value::Array(items) => Some(items.as_slice()),
            other => {
                self.errors
                    .add(path, format!("Expected array, received {}", received(other)));
                None
            }
        }
    }

    pub fn order_status(&mut self, path: &str, value: Option<&Value>) -> Option<OrderStatus> {
        if !self.present(path, value) {
            return None;
        }
        match value? {
            Value::String(s) => match s.parse::<OrderStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    self.errors.add(
                        path,
                        format!(
                            "Invalid enum value. Expected {}, received '{}'",
                            status_options(),
                            s
                        ),
                    );
                    None
                }
            },
            other => {
                self.errors.add(
                    path,
                    format!("Expected {}, received {}", status_options(), received(other)),
                );
                None
            }
        }
    }

    /// Returns the validated value only when no check failed.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}
