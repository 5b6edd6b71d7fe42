//! The logical query contract shared by every backend.
//!
//! Filters and orderings address top-level fields of a record's JSON form.
//! Values order as null < bool < number < string < anything else, and rows
//! that compare equal keep insertion order.

use crate::error::StoreError;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    /// Field is present, non-null and `>=` the value.
    Gte(String, Value),
    NotNull(String),
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq(f, _) | Filter::Gte(f, _) | Filter::NotNull(f) => f,
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        let got = field_of(row, self.field());
        match self {
            Filter::Eq(_, want) => compare_values(got, want) == Ordering::Equal,
            Filter::Gte(_, bound) => {
                !got.is_null() && compare_values(got, bound) != Ordering::Less
            }
            Filter::NotNull(_) => !got.is_null(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub field: String,
    pub descending: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    /// Most significant key first.
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.to_string(), value.into()));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(field.to_string(), value.into()));
        self
    }

    pub fn not_null(mut self, field: &str) -> Self {
        self.filters.push(Filter::NotNull(field.to_string()));
        self
    }

    pub fn order_by(mut self, field: &str) -> Self {
        self.order.push(Order {
            field: field.to_string(),
            descending: false,
        });
        self
    }

    pub fn order_by_desc(mut self, field: &str) -> Self {
        self.order.push(Order {
            field: field.to_string(),
            descending: true,
        });
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Rejects field names a backend could not address safely.
    pub fn validate(&self) -> Result<(), StoreError> {
        let fields = self
            .filters
            .iter()
            .map(Filter::field)
            .chain(self.order.iter().map(|o| o.field.as_str()));
        for field in fields {
            if !is_valid_field(field) {
                return Err(StoreError::InvalidField(field.to_string()));
            }
        }
        Ok(())
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Evaluates the query over rows held in memory, in insertion order.
    pub fn apply(&self, rows: Vec<Value>) -> Vec<Value> {
        let mut out: Vec<Value> = rows.into_iter().filter(|r| self.matches(r)).collect();
        if !self.order.is_empty() {
            out.sort_by(|a, b| self.compare_rows(a, b));
        }
        if let Some(n) = self.limit {
            out.truncate(n);
        }
        out
    }

    fn compare_rows(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.order {
            let ord = compare_values(field_of(a, &key.field), field_of(b, &key.field));
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

pub fn is_valid_field(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = x.as_f64().unwrap_or(f64::NAN);
                    let y = y.as_f64().unwrap_or(f64::NAN);
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    }
}

fn field_of<'a>(row: &'a Value, field: &str) -> &'a Value {
    row.get(field).unwrap_or(&Value::Null)
}
