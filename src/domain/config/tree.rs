// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Nested configuration tree exchanged with the host runtime.
//!
//! A tree is a map of snake_case keys to scalars, lists and nested maps.
//! Nested objects are usually wrapped in a one-element list; readers accept
//! both the wrapped and the bare form, writers always emit the wrapped form.

use crate::shared::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type ConfigMap = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(ConfigMap),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// A record that maps onto a tree node, one explicit function per direction.
pub trait TreeRecord: Sized {
    fn from_fields(fields: &Fields<'_>) -> Result<Self>;

    fn to_tree(&self) -> ConfigMap;
}

fn mismatch(path: &str, expected: &str, found: &Value) -> ProviderError {
    ProviderError::conversion(
        path,
        format!("expected {}, found {}", expected, found.type_name()),
    )
}

/// Strings accept any scalar; `version: 2` reads as `"2"`.
fn scalar_string(path: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Float(x) => Ok(x.to_string()),
        other => Err(mismatch(path, "string", other)),
    }
}

/// Integers accept numeric strings; anything out of range for `T` is a conversion error.
fn scalar_int<T: TryFrom<i64>>(path: &str, value: &Value) -> Result<T> {
    let i = match value {
        Value::Int(i) => *i,
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            ProviderError::conversion(path, format!("expected integer, found {:?}", s))
        })?,
        other => return Err(mismatch(path, "integer", other)),
    };
    T::try_from(i)
        .map_err(|_| ProviderError::conversion(path, format!("integer {} is out of range", i)))
}

fn scalar_bool(path: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => s.trim().parse::<bool>().map_err(|_| {
            ProviderError::conversion(path, format!("expected bool, found {:?}", s))
        }),
        other => Err(mismatch(path, "bool", other)),
    }
}

/// Read access to one map node, tracking its key path for error reports.
pub struct Fields<'a> {
    map: &'a ConfigMap,
    path: String,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a ConfigMap, path: impl Into<String>) -> Self {
        Self {
            map,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    fn list(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::List(items)) => Ok(items.as_slice()),
            Some(other) => Err(mismatch(&self.key_path(key), "list", other)),
        }
    }

    pub fn string(&self, key: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(v) => scalar_string(&self.key_path(key), v),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(v) => scalar_bool(&self.key_path(key), v),
        }
    }

    pub fn int<T: TryFrom<i64> + Default>(&self, key: &str) -> Result<T> {
        match self.get(key) {
            None => Ok(T::default()),
            Some(v) => scalar_int(&self.key_path(key), v),
        }
    }

    pub fn strings(&self, key: &str) -> Result<Vec<String>> {
        let base = self.key_path(key);
        self.list(key)?
            .iter()
            .enumerate()
            .map(|(i, v)| scalar_string(&format!("{}[{}]", base, i), v))
            .collect()
    }

    pub fn ints<T: TryFrom<i64>>(&self, key: &str) -> Result<Vec<T>> {
        let base = self.key_path(key);
        self.list(key)?
            .iter()
            .enumerate()
            .map(|(i, v)| scalar_int(&format!("{}[{}]", base, i), v))
            .collect()
    }

    pub fn records<T: TreeRecord>(&self, key: &str) -> Result<Vec<T>> {
        let base = self.key_path(key);
        self.list(key)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let path = format!("{}[{}]", base, i);
                match v {
                    Value::Map(map) => T::from_fields(&Fields::new(map, path)),
                    other => Err(mismatch(&path, "map", other)),
                }
            })
            .collect()
    }

    /// A single nested record, either bare or wrapped in a one-element list.
    pub fn record<T: TreeRecord>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        match self.get(key) {
            None => Ok(None),
            Some(Value::Map(map)) => T::from_fields(&Fields::new(map, path)).map(Some),
            Some(Value::List(items)) => match items.as_slice() {
                [] => Ok(None),
                [Value::Null] => Ok(None),
                [Value::Map(map)] => {
                    T::from_fields(&Fields::new(map, format!("{}[0]", path))).map(Some)
                }
                [other] => Err(mismatch(&format!("{}[0]", path), "map", other)),
                many => Err(ProviderError::conversion(
                    path,
                    format!("expected at most one element, found {}", many.len()),
                )),
            },
            Some(other) => Err(mismatch(&path, "map", other)),
        }
    }

    pub fn required_record<T: TreeRecord>(&self, key: &str) -> Result<T> {
        self.record(key)?
            .ok_or_else(|| ProviderError::conversion(self.key_path(key), "block is required"))
    }
}

/// Builds a tree node, omitting zero-valued optional fields.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    map: ConfigMap,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.map
                .insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    pub fn bool(mut self, key: &str, value: bool) -> Self {
        if value {
            self.map.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    pub fn int(mut self, key: &str, value: impl Into<i64>) -> Self {
        let value = value.into();
        if value != 0 {
            self.map.insert(key.to_string(), Value::Int(value));
        }
        self
    }

    pub fn strings(mut self, key: &str, values: &[String]) -> Self {
        if !values.is_empty() {
            let items = values.iter().cloned().map(Value::String).collect();
            self.map.insert(key.to_string(), Value::List(items));
        }
        self
    }

    pub fn ints<T: Copy + Into<i64>>(mut self, key: &str, values: &[T]) -> Self {
        if !values.is_empty() {
            let items = values.iter().map(|v| Value::Int((*v).into())).collect();
            self.map.insert(key.to_string(), Value::List(items));
        }
        self
    }

    pub fn records<T: TreeRecord>(mut self, key: &str, records: &[T]) -> Self {
        if !records.is_empty() {
            let items = records.iter().map(|r| Value::Map(r.to_tree())).collect();
            self.map.insert(key.to_string(), Value::List(items));
        }
        self
    }

    pub fn record<T: TreeRecord>(mut self, key: &str, record: Option<&T>) -> Self {
        if let Some(record) = record {
            self.map.insert(
                key.to_string(),
                Value::List(vec![Value::Map(record.to_tree())]),
            );
        }
        self
    }

    pub fn build(self) -> ConfigMap {
        self.map
    }
}

/// Decode the resource block stored under `key` at the root of a tree.
pub fn decode_block<T: TreeRecord>(root: &ConfigMap, key: &str) -> Result<T> {
    Fields::new(root, "").required_record(key)
}

/// Encode a record as the resource block stored under `key`.
pub fn encode_block<T: TreeRecord>(key: &str, record: &T) -> ConfigMap {
    TreeBuilder::new().record(key, Some(record)).build()
}
