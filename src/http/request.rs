use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;

use crate::utils::time::format_timestamp;

/// Ordered query string parameters. Absent values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Joins the values with commas; an empty list is omitted.
    pub fn push_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            let joined = values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
            self.push(key, joined);
        }
        self
    }

    pub fn push_time(&mut self, key: &str, value: Option<&DateTime<Utc>>) -> &mut Self {
        self.push_opt(key, value.map(format_timestamp))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// JSON object text in insertion order, duplicates kept. Used in request descriptions.
    pub fn describe(&self) -> String {
        let fields: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}:{}", Value::from(k.as_str()), Value::from(v.as_str())))
            .collect();
        format!("{{{}}}", fields.join(","))
    }
}

/// Ordered body fields, encoded as a form or a JSON object at dispatch time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyParams {
    fields: Vec<(String, Value)>,
}

impl BodyParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Form pairs; strings are sent unquoted, other values in their JSON text form.
    pub fn to_form(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.iter().cloned().collect())
    }
}

/// A single call against the API, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: BodyParams,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: BodyParams::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: BodyParams) -> Self {
        self.body = body;
        self
    }
}
