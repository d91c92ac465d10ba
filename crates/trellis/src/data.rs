//! External list data and `${key}` placeholder substitution.

use std::{cell::RefCell, rc::Rc};

use serde_json::Value;

use crate::error::{Error, Result};

/// A single data record.
pub type Record = serde_json::Map<String, Value>;

/// An ordered sequence of records that list nodes bind to.
///
/// The source is owned by the application and shared through `Rc`; list nodes
/// only hold a weak reference. Mutating the records takes effect on the next
/// layout pass.
#[derive(Debug, Default)]
pub struct DataSource {
    /// Records in display order.
    records: RefCell<Vec<Record>>,
}

impl DataSource {
    /// Wrap a set of records.
    pub fn new(records: Vec<Record>) -> Rc<Self> {
        Rc::new(Self {
            records: RefCell::new(records),
        })
    }

    /// Parse a JSON array of objects.
    pub fn from_json(s: &str) -> Result<Rc<Self>> {
        let value: Value = serde_json::from_str(s)?;
        let Value::Array(items) = value else {
            return Err(Error::Data("expected an array of records".into()));
        };
        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(Error::Data(format!("record {i} is not an object: {other}"))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(records))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Is the source empty?
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Append a record.
    pub fn push(&self, record: Record) {
        self.records.borrow_mut().push(record);
    }

    /// Replace every record.
    pub fn set(&self, records: Vec<Record>) {
        *self.records.borrow_mut() = records;
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    /// A snapshot of the records.
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// A copy of the record at an index.
    pub fn get(&self, index: usize) -> Option<Record> {
        self.records.borrow().get(index).cloned()
    }
}

/// Render a value for substitution. Values without a scalar rendering leave
/// their placeholder in place.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(format!("{f:.6}"))
                }
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Substitute `${key}` placeholders in `text` from a record.
///
/// Text without `${` is returned unchanged. Every occurrence of every key in
/// the record is replaced; unknown keys stay as written.
pub fn substitute(text: &str, record: &Record) -> String {
    if !text.contains("${") {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (key, value) in record {
        let Some(rendered) = render(value) else {
            continue;
        };
        let placeholder = format!("${{{key}}}");
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, &rendered);
        }
    }
    out
}
