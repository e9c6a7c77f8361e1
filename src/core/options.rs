//! Per-record options
//!
//! Options are applied in order to a `RecordOptions` builder. A later
//! option overwrites an earlier one for the same key, and the last error
//! option wins.

use super::field::{Field, FieldValue, Fields};
use std::fmt;

/// One per-call extension of a log record
pub enum LogOption {
    /// Attach an error under the context's configured error key
    Error(String),
    /// Attach a single field
    Field(String, FieldValue),
    /// Attach several fields, in order
    Fields(Fields),
    /// Attach a field whose value is computed only if the record is emitted
    LazyField(String, Box<dyn FnOnce() -> FieldValue + Send>),
}

impl LogOption {
    /// Error option from anything displayable, usually a `std::error::Error`
    pub fn error<E: fmt::Display + ?Sized>(err: &E) -> Self {
        LogOption::Error(err.to_string())
    }

    pub fn field(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        LogOption::Field(key.into(), value.into())
    }

    pub fn fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        LogOption::Fields(fields.into_iter().map(Field::from).collect())
    }

    /// Deferred field; `compute` runs after the level check passes
    pub fn lazy_field<F, V>(key: impl Into<String>, compute: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
        V: Into<FieldValue>,
    {
        LogOption::LazyField(key.into(), Box::new(move || compute().into()))
    }
}

impl fmt::Debug for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOption::Error(e) => f.debug_tuple("Error").field(e).finish(),
            LogOption::Field(k, v) => f.debug_tuple("Field").field(k).field(v).finish(),
            LogOption::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            LogOption::LazyField(k, _) => f.debug_tuple("LazyField").field(k).finish(),
        }
    }
}

/// Accumulated result of applying options for one record
#[derive(Debug, Default)]
pub struct RecordOptions {
    error: Option<String>,
    fields: Vec<Field>,
}

impl RecordOptions {
    /// Fold `options` into a fresh builder
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LogOption>,
    {
        options.into_iter().fold(Self::default(), |mut acc, option| {
            acc.apply(option);
            acc
        })
    }

    pub fn apply(&mut self, option: LogOption) {
        match option {
            LogOption::Error(err) => self.error = Some(err),
            LogOption::Field(key, value) => self.set(key, value),
            LogOption::Fields(fields) => {
                for field in fields {
                    self.set(field.key, field.value);
                }
            }
            LogOption::LazyField(key, compute) => self.set(key, compute()),
        }
    }

    fn set(&mut self, key: String, value: FieldValue) {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field { key, value }),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Final call-site fields; the error, if any, goes last under `error_key`
    pub fn into_fields(self, error_key: &str) -> Vec<Field> {
        let mut fields = self.fields;
        if let Some(err) = self.error {
            fields.push(Field::new(error_key, err));
        }
        fields
    }
}
