//! Asset/event selection and row filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::schema::ResultRow;

/// The user's chosen assets and events.
///
/// A row passes when both its asset and its event are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub assets: BTreeSet<String>,
    pub events: BTreeSet<String>,
}

impl Selection {
    pub fn new<A, E>(assets: A, events: E) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            assets: assets.into_iter().map(Into::into).collect(),
            events: events.into_iter().map(Into::into).collect(),
        }
    }

    /// Every distinct asset and event in the dataset (the default view).
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(dataset.assets(), dataset.events())
    }

    /// Build from explicit choices; an empty list means "all" for that axis.
    ///
    /// Names absent from the dataset are kept (they simply match nothing)
    /// and logged.
    pub fn from_choices(dataset: &Dataset, assets: &[String], events: &[String]) -> Self {
        let known_assets = dataset.assets();
        let known_events = dataset.events();
        for a in assets.iter().filter(|a| !known_assets.contains(a)) {
            log::warn!("asset '{a}' does not appear in {}", dataset.source().display());
        }
        for e in events.iter().filter(|e| !known_events.contains(e)) {
            log::warn!("event '{e}' does not appear in {}", dataset.source().display());
        }
        Self {
            assets: if assets.is_empty() {
                known_assets.into_iter().collect()
            } else {
                assets.iter().cloned().collect()
            },
            events: if events.is_empty() {
                known_events.into_iter().collect()
            } else {
                events.iter().cloned().collect()
            },
        }
    }

    pub fn matches(&self, row: &ResultRow) -> bool {
        self.assets.contains(&row.asset) && self.events.contains(&row.event)
    }

    /// Flip one asset in or out of the selection.
    pub fn toggle_asset(&mut self, asset: &str) {
        if !self.assets.remove(asset) {
            self.assets.insert(asset.to_string());
        }
    }

    /// Flip one event in or out of the selection.
    pub fn toggle_event(&mut self, event: &str) {
        if !self.events.remove(event) {
            self.events.insert(event.to_string());
        }
    }

    /// Drop names that are not present in the dataset.
    pub fn retain_known(&mut self, dataset: &Dataset) {
        let assets = dataset.assets();
        let events = dataset.events();
        self.assets.retain(|a| assets.contains(a));
        self.events.retain(|e| events.contains(e));
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() || self.events.is_empty()
    }
}

/// Rows passing the selection, in their original order.
pub fn filter_rows<'a>(rows: &'a [ResultRow], selection: &Selection) -> Vec<&'a ResultRow> {
    rows.iter().filter(|r| selection.matches(r)).collect()
}
