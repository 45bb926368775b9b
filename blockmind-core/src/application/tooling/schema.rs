//! Statically declared parameter lists for tools.
//!
//! A [`ParameterSchema`] is bound to a tool at registration time and serves two
//! purposes: validating the untyped arguments the model sends, and producing the
//! compact JSON schema the model sees.

use serde_json::{Map, Value, json};

use super::error::ValidationError;

/// Largest integer a JSON number can carry without losing precision.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    String,
    Boolean,
    /// Open-ended integers use the safe-integer range; those sentinel bounds are
    /// validated but never shown to the model.
    Integer { minimum: i64, maximum: i64 },
    /// Open-ended numbers use infinite bounds.
    Number { minimum: f64, maximum: f64 },
    Array(Box<ParamKind>),
    Object(Vec<Param>),
}

impl ParamKind {
    pub fn integer() -> Self {
        ParamKind::Integer {
            minimum: MIN_SAFE_INTEGER,
            maximum: MAX_SAFE_INTEGER,
        }
    }

    pub fn integer_range(minimum: i64, maximum: i64) -> Self {
        ParamKind::Integer { minimum, maximum }
    }

    pub fn number() -> Self {
        ParamKind::Number {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
        }
    }

    pub fn number_range(minimum: f64, maximum: f64) -> Self {
        ParamKind::Number { minimum, maximum }
    }

    pub fn array(item: ParamKind) -> Self {
        ParamKind::Array(Box::new(item))
    }

    pub fn object(fields: Vec<Param>) -> Self {
        ParamKind::Object(fields)
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::Integer { .. } => "integer",
            ParamKind::Number { .. } => "number",
            ParamKind::Array(_) => "array",
            ParamKind::Object(_) => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub description: Option<String>,
    pub required: bool,
}

impl Param {
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    params: Vec<Param>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Checks `raw` against the declared parameters and returns only the
    /// declared fields. Unknown fields are dropped; `null` counts as absent.
    pub fn validate(&self, raw: &Value) -> Result<Map<String, Value>, ValidationError> {
        match raw {
            Value::Null => validate_fields(&self.params, &Map::new(), ""),
            Value::Object(map) => validate_fields(&self.params, map, ""),
            other => Err(ValidationError::new(
                "arguments",
                format!("expected object, got {}", json_type(other)),
            )),
        }
    }

    /// Model-facing JSON schema.
    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.params)
    }
}

fn validate_fields(
    params: &[Param],
    map: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, ValidationError> {
    let mut validated = Map::new();
    for param in params {
        let path = if prefix.is_empty() {
            param.name.clone()
        } else {
            format!("{prefix}.{}", param.name)
        };
        match map.get(&param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err(ValidationError::new(path, "required field is missing"));
                }
            }
            Some(value) => {
                let checked = validate_value(&param.kind, value, &path)?;
                validated.insert(param.name.clone(), checked);
            }
        }
    }
    Ok(validated)
}

fn validate_value(kind: &ParamKind, value: &Value, path: &str) -> Result<Value, ValidationError> {
    let mismatch = || {
        ValidationError::new(
            path,
            format!("expected {}, got {}", kind.type_name(), json_type(value)),
        )
    };

    match kind {
        ParamKind::String => value.as_str().map(Value::from).ok_or_else(mismatch),
        ParamKind::Boolean => value.as_bool().map(Value::from).ok_or_else(mismatch),
        ParamKind::Integer { minimum, maximum } => {
            let number = as_integer(value).ok_or_else(mismatch)?;
            if number < *minimum || number > *maximum {
                return Err(ValidationError::new(
                    path,
                    format!("{number} is outside the range {minimum}..={maximum}"),
                ));
            }
            Ok(Value::from(number))
        }
        ParamKind::Number { minimum, maximum } => {
            let number = value
                .as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(mismatch)?;
            if number < *minimum || number > *maximum {
                return Err(ValidationError::new(
                    path,
                    format!("{number} is outside the range {minimum}..={maximum}"),
                ));
            }
            Ok(value.clone())
        }
        ParamKind::Array(item) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(index, entry)| validate_value(item, entry, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        ParamKind::Object(fields) => {
            let map = value.as_object().ok_or_else(mismatch)?;
            validate_fields(fields, map, path).map(Value::Object)
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    // Models sometimes send `3.0` for an integer.
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64)
        .map(|n| n as i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn object_schema(params: &[Param]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in params {
        properties.insert(
            param.name.clone(),
            kind_schema(&param.kind, param.description.as_deref()),
        );
        if param.required {
            required.push(Value::from(param.name.clone()));
        }
    }

    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = Value::Array(required);
    }
    schema
}

fn kind_schema(kind: &ParamKind, description: Option<&str>) -> Value {
    let mut schema = match kind {
        ParamKind::Object(fields) => object_schema(fields),
        ParamKind::Array(item) => json!({ "type": "array", "items": kind_schema(item, None) }),
        other => json!({ "type": other.type_name() }),
    };

    match kind {
        ParamKind::Integer { minimum, maximum } => {
            if *minimum != MIN_SAFE_INTEGER {
                schema["minimum"] = Value::from(*minimum);
            }
            if *maximum != MAX_SAFE_INTEGER {
                schema["maximum"] = Value::from(*maximum);
            }
        }
        ParamKind::Number { minimum, maximum } => {
            if minimum.is_finite() {
                schema["minimum"] = Value::from(*minimum);
            }
            if maximum.is_finite() {
                schema["maximum"] = Value::from(*maximum);
            }
        }
        _ => {}
    }

    if let Some(text) = description {
        schema["description"] = Value::from(text);
    }
    schema
}
