use std::collections::BTreeMap;
use std::fmt;

/// A plain, string-keyed data object: the raw material handed to the
/// reactive store before observation.
///
/// # Examples
///
/// ```
/// use tether::{Data, Value};
///
/// let data = Data::new()
///     .insert("name", "x")
///     .insert("count", 3);
///
/// assert_eq!(data.get("name"), Some(&Value::from("x")));
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Data {
    entries: BTreeMap<String, Value>,
}

impl Data {
    /// Create an empty data object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the object for chaining.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Insert a property in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a property by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to a property.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Whether the object has a property with this name.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over the properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Data {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A dynamically typed value stored in a [`Data`] object.
///
/// `Null` stands in for an absent/undefined value; sinks render it as the
/// empty string. `PartialEq` on `Value` is the project's equality rule: a
/// write that compares equal to the current value never notifies.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent or undefined.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Numeric (stored as `f64`).
    Number(f64),
    /// String.
    Str(String),
    /// Nested object.
    Object(Data),
}

impl Value {
    /// Whether this value is a composite object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string contents, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric contents, if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean contents, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The nested object, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Data> {
        match self {
            Value::Object(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => f.write_str(s),
            Value::Object(data) => {
                f.write_str("{")?;
                for (i, (key, value)) in data.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        Value::Object(data)
    }
}
