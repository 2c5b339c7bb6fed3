//! Workplace card aggregation and list filters
//!
//! A workplace card is a furnishing element carrying a non-empty workplace
//! number, joined with its resolved storey and the employee directory.
//! Elements without a usable number are not workplaces and never become
//! cards. Loaded cards also feed the faint all-workplaces outline.

use crate::data_access;
use crate::directory::EmployeeDirectory;
use crate::error::Result;
use crate::instance::ViewerInstance;
use crate::state::{Level, LevelFilter, OccupancyFilter, WorkplaceCardData};
use deskview_model::{ModelId, ModelIdMap};
use log::{debug, error, warn};
use std::cmp::Ordering;

/// Property set and property carrying the workplace number
pub const IDENTITY_DATA_SET: &str = "Identity Data";
pub const COMMENTS_PROPERTY: &str = "Comments";

/// Property set and property carrying the storey assignment
pub const CONSTRAINTS_SET: &str = "Constraints";
pub const LEVEL_PROPERTY: &str = "Level";

/// Display prefix some authoring tools prepend to the level value
const LEVEL_VALUE_PREFIX: &str = "Level: ";

impl ViewerInstance {
    /// Aggregate workplace cards from the given model
    ///
    /// Requires levels to be loaded first; cards resolve their storey against
    /// [`crate::state::LevelState`]. A failed load recovers to an empty list.
    pub fn load_workplace_cards(&mut self, model_id: &ModelId, directory: &EmployeeDirectory) {
        self.workplaces.is_loading = true;
        self.workplaces.cards.clear();

        match self.build_workplace_cards(model_id, directory) {
            Ok(cards) => {
                debug!("[Viewer {}] Loaded {} workplace card(s)", self.id(), cards.len());
                self.workplaces.cards = cards;
                self.refresh_workplace_outline(model_id);
            }
            Err(e) => {
                error!("[Viewer {}] Error loading workplaces: {e}", self.id());
                self.workplaces.cards = Vec::new();
            }
        }
        self.workplaces.is_loading = false;
    }

    fn build_workplace_cards(
        &self,
        model_id: &ModelId,
        directory: &EmployeeDirectory,
    ) -> Result<Vec<WorkplaceCardData>> {
        let model = self.model_by_id(model_id)?;
        let rows = data_access::fetch_workplace_rows(model.as_ref())?;

        let mut cards = Vec::new();
        for (record, psets) in rows {
            // The workplace number is the gate: empty after trim means the
            // element is not a workplace at all
            let number = psets
                .get(IDENTITY_DATA_SET, COMMENTS_PROPERTY)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let number = number.trim();
            if number.is_empty() {
                continue;
            }

            let level = psets
                .get(CONSTRAINTS_SET, LEVEL_PROPERTY)
                .map(|v| v.to_string())
                .and_then(|raw| self.resolve_level(&raw));

            let employee = directory.get_employee_by_workplace_number(number);
            cards.push(WorkplaceCardData {
                local_id: record.local_id,
                workplace_number: number.to_string(),
                level,
                employee_name: employee.map(|e| e.name.clone()),
                employee_avatar_url: employee.map(|e| e.avatar_url.clone()),
                is_occupied: employee.is_some(),
            });
        }
        Ok(cards)
    }

    /// Match a raw level property value against the loaded storeys
    ///
    /// Strips the authoring-tool display prefix and surrounding whitespace,
    /// then matches the storey name exactly (case-sensitive).
    fn resolve_level(&self, raw: &str) -> Option<Level> {
        let name = raw.strip_prefix(LEVEL_VALUE_PREFIX).unwrap_or(raw).trim();
        if name.is_empty() {
            return None;
        }
        self.levels.data.iter().find(|l| l.name.trim() == name).cloned()
    }

    /// Replace the faint outline set with all current workplace cards
    fn refresh_workplace_outline(&self, model_id: &ModelId) {
        let Some(highlighter) = &self.core.highlighter else {
            return;
        };
        let mut map = ModelIdMap::new();
        for card in &self.workplaces.cards {
            map.insert(model_id.clone(), card.local_id);
        }
        let result = if map.is_empty() {
            highlighter.clear_outline()
        } else {
            highlighter.set_outline(&map)
        };
        if let Err(e) = result {
            warn!("[Viewer {}] Error updating workplace outline: {e}", self.id());
        }
    }

    /// Levels that actually carry workplaces, deduplicated, ascending
    pub fn available_levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = Vec::new();
        for card in &self.workplaces.cards {
            if let Some(level) = &card.level {
                if !levels.iter().any(|l| l.name == level.name) {
                    levels.push(level.clone());
                }
            }
        }
        levels.sort_by(|a, b| a.elevation.partial_cmp(&b.elevation).unwrap_or(Ordering::Equal));
        levels
    }

    /// Cards passing the level, occupancy, and search filters, sorted by
    /// level elevation
    ///
    /// Cards without a resolved level sort as elevation zero; the sort is
    /// stable, so they keep their relative order.
    pub fn filtered_workplace_cards(&self) -> Vec<WorkplaceCardData> {
        let search = self.filters.search.trim().to_lowercase();
        let mut cards: Vec<WorkplaceCardData> = self
            .workplaces
            .cards
            .iter()
            .filter(|card| match &self.filters.level {
                LevelFilter::All => true,
                LevelFilter::Level(name) => {
                    card.level.as_ref().is_some_and(|l| &l.name == name)
                }
            })
            .filter(|card| match self.filters.occupancy {
                OccupancyFilter::All => true,
                OccupancyFilter::Occupied => card.is_occupied,
                OccupancyFilter::Vacant => !card.is_occupied,
            })
            .filter(|card| {
                if search.is_empty() {
                    return true;
                }
                card.workplace_number.to_lowercase().contains(&search)
                    || card
                        .employee_name
                        .as_ref()
                        .is_some_and(|n| n.to_lowercase().contains(&search))
            })
            .cloned()
            .collect();
        cards.sort_by(|a, b| {
            let ea = a.level.as_ref().map_or(0.0, |l| l.elevation);
            let eb = b.level.as_ref().map_or(0.0, |l| l.elevation);
            ea.partial_cmp(&eb).unwrap_or(Ordering::Equal)
        });
        cards
    }

    pub fn set_level_filter(&mut self, filter: LevelFilter) {
        self.filters.level = filter;
        self.on_filters_changed();
    }

    pub fn set_occupancy_filter(&mut self, filter: OccupancyFilter) {
        self.filters.occupancy = filter;
        self.on_filters_changed();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search = query.into();
        self.on_filters_changed();
    }

    /// Any filter change drops the selection and re-syncs marker visibility
    fn on_filters_changed(&mut self) {
        self.highlight_clear();
        self.update_markers_visibility();
    }

    /// Drop all workplace data, markers, and the outline
    pub fn clear_workplaces(&mut self) {
        self.clear_all_markers();
        if let Some(highlighter) = &self.core.highlighter {
            if let Err(e) = highlighter.clear_outline() {
                warn!("[Viewer {}] Error clearing workplace outline: {e}", self.id());
            }
        }
        self.workplaces.clear();
    }
}
