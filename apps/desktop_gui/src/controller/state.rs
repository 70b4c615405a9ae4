//! Directory view state: load status, filter inputs and the memoized listing.

use std::collections::BTreeSet;

use client_core::{DirectoryData, FilterState, ListingMemo, LoadState, SortKey};
use shared::domain::Practitioner;

/// What the list area shows, in priority order.
#[derive(Debug)]
pub enum ListingView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(Vec<&'a Practitioner>),
}

pub struct DirectoryState {
    load: LoadState,
    filters: FilterState,
    memo: ListingMemo,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryState {
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            filters: FilterState::default(),
            memo: ListingMemo::new(),
        }
    }

    pub fn apply_loaded(&mut self, data: DirectoryData) {
        self.load = LoadState::Ready(data);
    }

    pub fn apply_load_error(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn record_count(&self) -> usize {
        match &self.load {
            LoadState::Ready(data) => data.records().len(),
            LoadState::Loading | LoadState::Failed(_) => 0,
        }
    }

    pub fn categories(&self) -> Option<&BTreeSet<String>> {
        match &self.load {
            LoadState::Ready(data) => Some(data.categories()),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.set_query(query);
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.filters.toggle_category(category);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.filters.set_sort(sort);
    }

    pub fn clear_all(&mut self) {
        self.filters.clear_all();
    }

    pub fn view(&mut self) -> ListingView<'_> {
        match &self.load {
            LoadState::Loading => ListingView::Loading,
            LoadState::Failed(message) => ListingView::Error(message),
            LoadState::Ready(data) => {
                let listing = self.memo.get(data.records(), &self.filters);
                if listing.is_empty() {
                    ListingView::Empty
                } else {
                    ListingView::Populated(listing)
                }
            }
        }
    }

    #[cfg(test)]
    pub fn listing_recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}
