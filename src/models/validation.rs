use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// One segment of the path to an offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub code: &'static str,
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<&'static str>,
}

impl FieldError {
    fn invalid_type(path: Vec<PathSegment>, expected: &'static str, received: &'static str) -> Self {
        let message = if received == "undefined" || received == "null" {
            "Required".to_string()
        } else {
            format!("Expected {expected}, received {received}")
        };
        Self {
            code: "invalid_type",
            path,
            message,
            expected: Some(expected),
            received: Some(received),
        }
    }

    /// True when the first path segment names `key`.
    pub fn is_for(&self, key: &str) -> bool {
        matches!(self.path.first(), Some(PathSegment::Key(k)) if k == key)
    }
}

/// Every field-level problem found in one payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The body could not be read as JSON at all.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self(vec![FieldError {
            code: "invalid_json",
            path: Vec::new(),
            message: reason.into(),
            expected: None,
            received: None,
        }])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts RFC 3339, a naive ISO date-time (read as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Reads typed fields out of a JSON object while collecting every error.
///
/// Required readers return a placeholder when the field is invalid; the
/// placeholder never escapes because [`Fields::finish`] fails in that case.
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(input: &'a Value) -> Result<Self, ValidationErrors> {
        match input {
            Value::Object(object) => Ok(Self {
                object,
                errors: Vec::new(),
            }),
            other => Err(ValidationErrors(vec![FieldError::invalid_type(
                Vec::new(),
                "object",
                type_name(other),
            )])),
        }
    }

    /// Missing and `null` both read as absent.
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn missing(&mut self, key: &str, expected: &'static str) {
        let received = if self.object.contains_key(key) {
            "null"
        } else {
            "undefined"
        };
        self.errors
            .push(FieldError::invalid_type(vec![key.into()], expected, received));
    }

    fn mismatch(&mut self, path: Vec<PathSegment>, expected: &'static str, value: &Value) {
        self.errors
            .push(FieldError::invalid_type(path, expected, type_name(value)));
    }

    fn string_at(&mut self, key: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(vec![key.into()], "string", other);
                None
            }
        }
    }

    fn integer_at(&mut self, key: &str, value: &Value) -> Option<i32> {
        let Value::Number(number) = value else {
            self.mismatch(vec![key.into()], "number", value);
            return None;
        };
        if let Some(wide) = number.as_i64() {
            return match i32::try_from(wide) {
                Ok(n) => Some(n),
                Err(_) => {
                    self.out_of_range(key, wide > 0);
                    None
                }
            };
        }
        if number.is_u64() {
            self.out_of_range(key, true);
            return None;
        }

        // Whole floats such as `16.0` or `1e2` still count as integers.
        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => {
                if f > f64::from(i32::MAX) {
                    self.out_of_range(key, true);
                    None
                } else if f < f64::from(i32::MIN) {
                    self.out_of_range(key, false);
                    None
                } else {
                    Some(f as i32)
                }
            }
            _ => {
                self.mismatch(vec![key.into()], "integer", value);
                None
            }
        }
    }

    fn out_of_range(&mut self, key: &str, too_big: bool) {
        let (code, message) = if too_big {
            (
                "too_big",
                format!("Number must be less than or equal to {}", i32::MAX),
            )
        } else {
            (
                "too_small",
                format!("Number must be greater than or equal to {}", i32::MIN),
            )
        };
        self.errors.push(FieldError {
            code,
            path: vec![key.into()],
            message,
            expected: None,
            received: None,
        });
    }

    fn timestamp_at(&mut self, key: &str, value: &Value) -> Option<DateTime<Utc>> {
        let Value::String(raw) = value else {
            self.mismatch(vec![key.into()], "date", value);
            return None;
        };
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            self.errors.push(FieldError {
                code: "invalid_date",
                path: vec![key.into()],
                message: "Invalid date".to_string(),
                expected: None,
                received: None,
            });
        }
        parsed
    }

    pub fn required_string(&mut self, key: &str) -> String {
        match self.present(key) {
            Some(value) => self.string_at(key, value).unwrap_or_default(),
            None => {
                self.missing(key, "string");
                String::new()
            }
        }
    }

    pub fn required_timestamp(&mut self, key: &str) -> DateTime<Utc> {
        match self.present(key) {
            Some(value) => self
                .timestamp_at(key, value)
                .unwrap_or_default(),
            None => {
                self.missing(key, "date");
                DateTime::<Utc>::default()
            }
        }
    }

    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.present(key)?;
        self.string_at(key, value)
    }

    pub fn optional_integer(&mut self, key: &str) -> Option<i32> {
        let value = self.present(key)?;
        self.integer_at(key, value)
    }

    pub fn optional_boolean(&mut self, key: &str) -> Option<bool> {
        match self.present(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.mismatch(vec![key.into()], "boolean", other);
                None
            }
        }
    }

    pub fn optional_string_list(&mut self, key: &str) -> Option<Vec<String>> {
        let value = self.present(key)?;
        let Value::Array(items) = value else {
            self.mismatch(vec![key.into()], "array", value);
            return None;
        };

        let mut strings = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => strings.push(s.clone()),
                other => self.mismatch(vec![key.into(), index.into()], "string", other),
            }
        }
        Some(strings)
    }

    /// Succeeds only if no reader recorded an error.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
