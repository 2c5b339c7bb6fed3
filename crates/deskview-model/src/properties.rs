// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw item and property-set shapes returned by the import engine
//!
//! Bulk item queries return loosely shaped records: attributes may be missing
//! their nominal value, property sets may lack a well-formed name or
//! properties array. These types preserve that shape at the boundary so the
//! viewer's data-access layer can validate once and hand strict records to
//! the rest of the core.

use crate::LocalId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A decoded nominal value of an item attribute or property
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
    Null,
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{s}"),
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::Null => Ok(()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

/// One raw attribute record; `value` is absent for malformed records
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub value: Option<AttributeValue>,
}

impl ItemAttribute {
    pub fn new(value: AttributeValue) -> Self {
        Self { value: Some(value) }
    }

    pub fn missing() -> Self {
        Self { value: None }
    }
}

impl From<AttributeValue> for ItemAttribute {
    fn from(value: AttributeValue) -> Self {
        ItemAttribute::new(value)
    }
}

/// One raw property inside a property set
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RawProperty {
    pub name: Option<ItemAttribute>,
    pub nominal_value: Option<ItemAttribute>,
}

impl RawProperty {
    pub fn new(name: &str, value: AttributeValue) -> Self {
        Self {
            name: Some(ItemAttribute::new(AttributeValue::Text(name.to_string()))),
            nominal_value: Some(ItemAttribute::new(value)),
        }
    }
}

/// One raw property set attached to an item
///
/// `properties` is `None` when the relation did not expand to a well-formed
/// properties array.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RawPropertySet {
    pub name: Option<ItemAttribute>,
    pub properties: Option<Vec<RawProperty>>,
}

impl RawPropertySet {
    pub fn new(name: &str, properties: Vec<RawProperty>) -> Self {
        Self {
            name: Some(ItemAttribute::new(AttributeValue::Text(name.to_string()))),
            properties: Some(properties),
        }
    }
}

/// One raw item record returned by a bulk item-data query
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ItemRecord {
    pub local_id: LocalId,
    /// IFC category name (e.g., "IFCFURNISHINGELEMENT"), when requested
    pub category: Option<String>,
    /// Default attributes keyed by name (Name, Elevation, Tag, ...)
    pub attributes: HashMap<String, ItemAttribute>,
    /// Property sets expanded from the defining relations, when requested
    pub property_sets: Vec<RawPropertySet>,
}

impl ItemRecord {
    pub fn new(local_id: LocalId) -> Self {
        Self {
            local_id,
            category: None,
            attributes: HashMap::new(),
            property_sets: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)?.value.as_ref()
    }

    /// Builder-style helpers used by engine adapters and tests
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: AttributeValue) -> Self {
        self.attributes
            .insert(name.to_string(), ItemAttribute::new(value));
        self
    }

    pub fn with_property_set(mut self, pset: RawPropertySet) -> Self {
        self.property_sets.push(pset);
        self
    }
}
