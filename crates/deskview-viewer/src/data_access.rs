//! Raw model queries and property-set formatting
//!
//! Bulk item records come back loosely shaped; this module validates them
//! once and hands strict values to the feature layers. Malformed sets,
//! properties without a well-formed name, and properties without a nominal
//! value are skipped silently, so one bad record never aborts a bulk query.

use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use crate::state::Level;
use deskview_model::{
    AttributeValue, CategoryPattern, FragmentModel, ItemQueryConfig, ItemRecord, LocalId, ModelId,
    RawPropertySet, BUILDING_STOREY_PATTERN, FURNISHING_ELEMENT_PATTERN,
};
use log::warn;
use std::collections::HashMap;

/// Validated property sets of one item: set name to property name to value
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FormattedPsets {
    sets: HashMap<String, HashMap<String, AttributeValue>>,
}

impl FormattedPsets {
    /// Value of `property` inside the set called `set`
    pub fn get(&self, set: &str, property: &str) -> Option<&AttributeValue> {
        self.sets.get(set)?.get(property)
    }

    /// Value of `property` in whichever set defines it first
    ///
    /// Set iteration order is unspecified; use [`Self::get`] when the set
    /// name is known.
    pub fn find_any(&self, property: &str) -> Option<&AttributeValue> {
        self.sets.values().find_map(|props| props.get(property))
    }

    pub fn set(&self, name: &str) -> Option<&HashMap<String, AttributeValue>> {
        self.sets.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Flatten raw property sets into name/value maps, skipping malformed entries
pub fn format_item_psets(raw: &[RawPropertySet]) -> FormattedPsets {
    let mut sets = HashMap::new();
    for pset in raw {
        let Some(set_name) = attribute_text(&pset.name) else {
            continue;
        };
        let Some(properties) = &pset.properties else {
            continue;
        };
        let mut values = HashMap::new();
        for property in properties {
            let Some(name) = attribute_text(&property.name) else {
                continue;
            };
            let Some(value) = property
                .nominal_value
                .as_ref()
                .and_then(|attr| attr.value.clone())
            else {
                continue;
            };
            values.insert(name.to_string(), value);
        }
        sets.insert(set_name.to_string(), values);
    }
    FormattedPsets { sets }
}

fn attribute_text(attr: &Option<deskview_model::ItemAttribute>) -> Option<&str> {
    let text = attr.as_ref()?.value.as_ref()?.as_text()?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extract building storeys from the model, unsorted
///
/// Items missing a usable Name or Elevation attribute are logged and
/// excluded; the rest of the batch still comes through.
pub fn fetch_levels(model: &dyn FragmentModel) -> Result<Vec<Level>> {
    let categories =
        model.items_of_categories(&[CategoryPattern::new(BUILDING_STOREY_PATTERN)])?;
    let ids: Vec<LocalId> = categories.into_values().flatten().collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let records = model.items_data(&ids, &ItemQueryConfig::attributes_only())?;
    let mut levels = Vec::with_capacity(records.len());
    for record in records {
        let Some(name) = record.attribute("Name").and_then(AttributeValue::as_text) else {
            warn!("Skipping storey {} without a Name attribute", record.local_id);
            continue;
        };
        let Some(elevation) = record.attribute("Elevation").and_then(AttributeValue::as_number)
        else {
            warn!("Skipping storey '{name}' without an Elevation attribute");
            continue;
        };
        levels.push(Level {
            name: name.to_string(),
            elevation,
            local_id: record.local_id,
        });
    }
    Ok(levels)
}

/// Fetch all furnishing elements with their formatted property sets
pub fn fetch_workplace_rows(
    model: &dyn FragmentModel,
) -> Result<Vec<(ItemRecord, FormattedPsets)>> {
    let categories =
        model.items_of_categories(&[CategoryPattern::new(FURNISHING_ELEMENT_PATTERN)])?;
    let ids: Vec<LocalId> = categories.into_values().flatten().collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let config = ItemQueryConfig {
        attributes_default: true,
        with_property_sets: true,
        ..ItemQueryConfig::default()
    };
    let records = model.items_data(&ids, &config)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let psets = format_item_psets(&record.property_sets);
            (record, psets)
        })
        .collect())
}

impl ViewerInstance {
    /// Resolve a model id against the loaded model
    pub(crate) fn model_by_id(
        &self,
        model_id: &ModelId,
    ) -> Result<&std::sync::Arc<dyn FragmentModel>> {
        match &self.model.model {
            Some(model) if model.model_id() == model_id => Ok(model),
            _ => Err(ViewerError::ModelNotFound(model_id.clone())),
        }
    }
}
