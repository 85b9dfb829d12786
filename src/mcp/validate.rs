//! JSON schema checks for tool arguments.
//!
//! Covers the subset of JSON Schema that `schemars` emits for parameter
//! structs: `type` (single or union), `enum`, `const`, `required`,
//! `properties`, `additionalProperties: false`, `items`, `minItems`,
//! `minimum`/`maximum`, `$ref`, `allOf`, `anyOf` and `oneOf` (exactly one
//! branch must match).

use serde_json::{Map, Value};

/// Check `arguments` against `schema`, returning the first mismatch.
pub fn validate(schema: &Map<String, Value>, arguments: &Map<String, Value>) -> Result<(), String> {
    let root = Value::Object(schema.clone());
    let validator = Validator { root: &root };
    validator.check(&root, &Value::Object(arguments.clone()), "")
}

struct Validator<'a> {
    root: &'a Value,
}

fn field(path: &str) -> &str {
    if path.is_empty() { "arguments" } else { path }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "null" => value.is_null(),
        "boolean" => value.is_boolean(),
        "string" => value.is_string(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "number" => value.is_number(),
        "integer" => match value {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        },
        _ => true,
    }
}

impl Validator<'_> {
    fn resolve(&self, reference: &str) -> Option<&Value> {
        reference
            .strip_prefix('#')
            .and_then(|pointer| self.root.pointer(pointer))
    }

    fn check(&self, schema: &Value, value: &Value, path: &str) -> Result<(), String> {
        let schema = match schema {
            Value::Bool(true) => return Ok(()),
            Value::Bool(false) => return Err(format!("'{}' is not allowed", field(path))),
            Value::Object(schema) => schema,
            _ => return Ok(()),
        };

        if let Some(Value::String(reference)) = schema.get("$ref") {
            let target = self
                .resolve(reference)
                .ok_or_else(|| format!("schema reference {reference} cannot be resolved"))?;
            self.check(target, value, path)?;
        }

        if let Some(Value::Array(all)) = schema.get("allOf") {
            for branch in all {
                self.check(branch, value, path)?;
            }
        }

        for keyword in ["anyOf", "oneOf"] {
            if let Some(Value::Array(branches)) = schema.get(keyword) {
                let exclusive = keyword == "oneOf";
                let mut first_error = None;
                let mut matched = 0;
                for branch in branches {
                    match self.check(branch, value, path) {
                        Ok(()) => matched += 1,
                        Err(e) => {
                            first_error.get_or_insert(e);
                        }
                    }
                    if matched > 0 && !exclusive {
                        break;
                    }
                }
                if matched == 0 {
                    // A null branch is the Option wrapper; the other branch explains the miss
                    return Err(first_error
                        .filter(|_| branches.len() <= 2)
                        .unwrap_or_else(|| {
                            format!("'{}' does not match any allowed shape", field(path))
                        }));
                }
                if exclusive && matched > 1 {
                    return Err(format!(
                        "'{}' matches more than one allowed shape",
                        field(path)
                    ));
                }
            }
        }

        if let Some(expected) = schema.get("type") {
            let allowed: Vec<&str> = match expected {
                Value::String(t) => vec![t.as_str()],
                Value::Array(types) => types.iter().filter_map(Value::as_str).collect(),
                _ => Vec::new(),
            };
            if !allowed.is_empty() && !allowed.iter().any(|t| matches_type(t, value)) {
                let wanted: Vec<&str> = allowed.into_iter().filter(|t| *t != "null").collect();
                return Err(format!(
                    "'{}' must be {}, got {}",
                    field(path),
                    wanted.join(" or "),
                    type_name(value)
                ));
            }
        }

        if let Some(Value::Array(options)) = schema.get("enum") {
            if !options.contains(value) {
                let listed: Vec<String> = options.iter().map(Value::to_string).collect();
                return Err(format!(
                    "'{}' must be one of [{}], got {}",
                    field(path),
                    listed.join(", "),
                    value
                ));
            }
        }

        if let Some(constant) = schema.get("const") {
            if constant != value {
                return Err(format!("'{}' must be {}", field(path), constant));
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
                if number < min {
                    return Err(format!("'{}' must be at least {}", field(path), min));
                }
            }
            if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
                if number > max {
                    return Err(format!("'{}' must be at most {}", field(path), max));
                }
            }
        }

        match value {
            Value::Object(object) => self.check_object(schema, object, path),
            Value::Array(items) => self.check_array(schema, items, path),
            _ => Ok(()),
        }
    }

    fn check_object(
        &self,
        schema: &Map<String, Value>,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<(), String> {
        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(name) {
                    return Err(format!("missing required field '{}'", child(path, name)));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        for (key, item) in object {
            match properties.and_then(|p| p.get(key)) {
                Some(property) => self.check(property, item, &child(path, key))?,
                None => {
                    if let Some(additional) = schema.get("additionalProperties") {
                        if additional == &Value::Bool(false) {
                            return Err(format!("unknown field '{}'", child(path, key)));
                        }
                        self.check(additional, item, &child(path, key))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_array(
        &self,
        schema: &Map<String, Value>,
        items: &[Value],
        path: &str,
    ) -> Result<(), String> {
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                return Err(format!(
                    "'{}' must contain at least {} item(s)",
                    field(path),
                    min
                ));
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (index, item) in items.iter().enumerate() {
                self.check(item_schema, item, &format!("{}[{index}]", field(path)))?;
            }
        }
        Ok(())
    }
}
