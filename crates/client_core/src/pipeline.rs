//! Filter and sort pipeline over the loaded practitioner set.
//!
//! Stages run in a fixed order: text search, category filter, sort. The
//! pipeline never mutates its input; it yields positions into the record
//! slice so callers can borrow records without cloning them.

use std::{collections::BTreeSet, sync::Arc};

use shared::domain::Practitioner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Price: low to high.
    #[default]
    FeeAscending,
    /// Most experience first.
    ExperienceDescending,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::FeeAscending => "Price: Low-High",
            Self::ExperienceDescending => "Experience: Most Experience first",
        }
    }
}

/// Extracts the first run of ASCII digits from free text.
///
/// Text without digits yields 0; values past `u64::MAX` saturate.
pub fn leading_integer(text: &str) -> u64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().unwrap_or(u64::MAX)
}

/// The user-controlled inputs of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    selected: BTreeSet<String>,
    sort: SortKey,
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.contains(category)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected.remove(category) {
            self.selected.insert(category.to_string());
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.sort = SortKey::default();
        self.query.clear();
    }
}

fn matches_query(practitioner: &Practitioner, needle: &str) -> bool {
    practitioner.name.to_lowercase().contains(needle)
        || practitioner
            .speciality_names()
            .any(|name| name.to_lowercase().contains(needle))
        || practitioner
            .clinic_name()
            .is_some_and(|name| name.to_lowercase().contains(needle))
}

fn matches_categories(practitioner: &Practitioner, selected: &BTreeSet<String>) -> bool {
    practitioner
        .speciality_names()
        .any(|name| selected.contains(name))
}

/// Returns positions into `records` in display order.
pub fn rank_indices(records: &[Practitioner], state: &FilterState) -> Vec<usize> {
    let needle = state.query.to_lowercase();
    let mut ranked: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, practitioner)| needle.is_empty() || matches_query(practitioner, &needle))
        .filter(|(_, practitioner)| {
            state.selected.is_empty() || matches_categories(practitioner, &state.selected)
        })
        .map(|(index, _)| index)
        .collect();

    // `sort_by_key` is stable, so ties keep listing order.
    match state.sort {
        SortKey::FeeAscending => {
            ranked.sort_by_key(|&index| leading_integer(&records[index].fees));
        }
        SortKey::ExperienceDescending => {
            ranked.sort_by_key(|&index| {
                std::cmp::Reverse(leading_integer(&records[index].experience))
            });
        }
    }
    ranked
}

pub fn filter_and_sort<'a>(records: &'a [Practitioner], state: &FilterState) -> Vec<&'a Practitioner> {
    rank_indices(records, state)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Caches the last pipeline result and recomputes only when an input changes.
#[derive(Debug, Default)]
pub struct ListingMemo {
    inputs: Option<(Arc<[Practitioner]>, FilterState)>,
    ranked: Vec<usize>,
    recomputations: u64,
}

impl ListingMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<'a>(&mut self, records: &'a Arc<[Practitioner]>, state: &FilterState) -> Vec<&'a Practitioner> {
        let fresh = match &self.inputs {
            Some((cached_records, cached_state)) => {
                Arc::ptr_eq(cached_records, records) && cached_state == state
            }
            None => false,
        };
        if !fresh {
            self.ranked = rank_indices(records, state);
            self.inputs = Some((Arc::clone(records), state.clone()));
            self.recomputations += 1;
            tracing::trace!(
                matches = self.ranked.len(),
                recomputations = self.recomputations,
                "recomputed practitioner listing"
            );
        }
        self.ranked.iter().map(|&index| &records[index]).collect()
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
