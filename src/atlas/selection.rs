//! Multi-select state for research-map nodes.
//!
//! Selection is keyed by node id only and is never reconciled against the
//! graph: an id stays selected after its node is removed until it is
//! toggled again or the selection is cleared.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of selected node ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectionSet {
	ids: BTreeSet<String>,
	#[serde(skip)]
	revision: u64,
}

impl PartialEq for SelectionSet {
	fn eq(&self, other: &Self) -> bool {
		self.ids == other.ids
	}
}

impl Eq for SelectionSet {}

impl SelectionSet {
	/// Empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add `id` if absent, remove it if present. Any string is accepted.
	pub fn toggle(&mut self, id: &str) {
		if !self.ids.remove(id) {
			self.ids.insert(id.to_string());
		}
		self.revision = self.revision.saturating_add(1);
	}

	/// Copy of this selection with `id` toggled.
	pub fn toggled(&self, id: &str) -> Self {
		let mut next = self.clone();
		next.toggle(id);
		next
	}

	/// Deselect everything.
	pub fn clear(&mut self) {
		if self.ids.is_empty() {
			return;
		}
		self.ids.clear();
		self.revision = self.revision.saturating_add(1);
	}

	/// Whether `id` is selected.
	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	/// Number of selected ids.
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// True when nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Selected ids in lexical order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.ids.iter().map(String::as_str)
	}

	/// Incremented on every change. Not part of equality.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn click_twice_deselects() {
		let mut selection = SelectionSet::new();
		assert!(selection.is_empty());
		selection.toggle("doc-0");
		assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["doc-0"]);
		selection.toggle("doc-0");
		assert!(selection.is_empty());
	}

	#[test]
	fn toggle_is_an_involution() {
		let base = ["doc-0", "section-0-1", "doc-3"]
			.iter()
			.fold(SelectionSet::new(), |s, id| s.toggled(id));
		for id in ["doc-0", "doc-1", "section-0-1", "", "not-a-node"] {
			assert_eq!(base.toggled(id).toggled(id), base);
		}
	}

	#[test]
	fn selection_is_unbounded_and_order_insensitive() {
		let mut a = SelectionSet::new();
		let mut b = SelectionSet::new();
		for i in 0..50 {
			a.toggle(&format!("doc-{i}"));
		}
		for i in (0..50).rev() {
			b.toggle(&format!("doc-{i}"));
		}
		assert_eq!(a.len(), 50);
		assert_eq!(a, b);
	}

	#[test]
	fn revision_tracks_changes() {
		let mut selection = SelectionSet::new();
		selection.clear();
		assert_eq!(selection.revision(), 0);
		selection.toggle("doc-0");
		selection.toggle("doc-1");
		assert_eq!(selection.revision(), 2);
		selection.clear();
		assert_eq!(selection.revision(), 3);
		assert!(selection.is_empty());
	}

	proptest! {
		#[test]
		fn toggling_twice_restores_any_selection(
			ids in prop::collection::vec("[a-z0-9-]{0,8}", 0..20),
			id in "[a-z0-9-]{0,8}",
		) {
			let base = ids.iter().fold(SelectionSet::new(), |s, i| s.toggled(i));
			prop_assert_eq!(base.toggled(&id).toggled(&id), base.clone());
			prop_assert_ne!(base.toggled(&id).contains(&id), base.contains(&id));
		}
	}
}
