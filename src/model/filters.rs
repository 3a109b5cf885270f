//! Filter list state - the ordered collection of filter rules
//!
//! Each rule is one line of the filter file (`+ /path`, `- /path`, or an
//! arbitrary string) carrying an explicit rank. Positions stay unique and
//! dense (`0..len`) after every mutation, and export order is always
//! ascending position rather than insertion order.

/// One filter rule with its rank in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// Literal line content, e.g. `+ /home/user/saves`
    pub label: String,
    /// Zero-based rank in display/save order
    pub position: usize,
}

/// Ordered collection of filter rules, owned by one app instance.
#[derive(Debug, Clone, Default)]
pub struct FilterList {
    entries: Vec<FilterEntry>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from plain lines; each line's position is its index.
    ///
    /// Lines are taken as-is: no deduplication, no reordering, no
    /// validation of content. An empty input yields an empty list.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: lines
                .into_iter()
                .enumerate()
                .map(|(index, line)| FilterEntry {
                    label: line.into(),
                    position: index,
                })
                .collect(),
        }
    }

    /// Export labels in ascending position order.
    pub fn to_lines(&self) -> Vec<String> {
        let mut sorted: Vec<&FilterEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|entry| entry.position);
        sorted.iter().map(|entry| entry.label.clone()).collect()
    }

    /// Append a new rule at the end of the list.
    ///
    /// The new entry takes position `len()`; existing positions are left
    /// untouched.
    pub fn append(&mut self, label: impl Into<String>) {
        self.entries.push(FilterEntry {
            label: label.into(),
            position: self.entries.len(),
        });
    }

    /// Remove the entry at the given position, closing the gap.
    ///
    /// A position with no matching entry is a silent no-op. Every
    /// surviving entry ranked after the removed one moves up by one, so
    /// positions stay dense and relative order is preserved.
    pub fn remove_at(&mut self, position: usize) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.position != position);
        if self.entries.len() == before {
            return;
        }
        for entry in &mut self.entries {
            if entry.position > position {
                entry.position -= 1;
            }
        }
    }

    /// Accept a full replacement list from the reorder widget.
    ///
    /// The widget owns position bookkeeping during the gesture; its
    /// output is taken verbatim as the new truth.
    pub fn replace_all(&mut self, entries: Vec<FilterEntry>) {
        self.entries = entries;
    }

    /// Replace the label of the entry at `position`, keeping its rank.
    pub fn set_label(&mut self, position: usize, label: impl Into<String>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.position == position)
        {
            entry.label = label.into();
        }
    }

    /// Label of the entry at `position`, if any.
    pub fn label_at(&self, position: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.position == position)
            .map(|entry| entry.label.as_str())
    }

    /// Entries in ascending position order, for rendering.
    pub fn ordered(&self) -> Vec<FilterEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| entry.position);
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize for clipboard transfer: labels joined by newlines.
    pub fn to_text(&self) -> String {
        self.to_lines().join("\n")
    }

    /// Parse clipboard text: trim surrounding whitespace, split on `\n`.
    ///
    /// Trimming means a trailing blank line never becomes a spurious
    /// final entry. Empty input still yields one empty entry, because
    /// splitting an empty string produces a single empty piece; callers
    /// that care should check for empty text first.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.trim().split('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(list: &FilterList) -> Vec<String> {
        list.to_lines()
    }

    #[test]
    fn test_from_lines_assigns_index_positions() {
        let list = FilterList::from_lines(["a", "b", "c"]);
        let ordered = list.ordered();
        assert_eq!(ordered.len(), 3);
        for (index, entry) in ordered.iter().enumerate() {
            assert_eq!(entry.position, index);
        }
        assert_eq!(labels(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_lines_keeps_duplicates_and_order() {
        let list = FilterList::from_lines(["x", "x", ""]);
        assert_eq!(labels(&list), vec!["x", "x", ""]);
    }

    #[test]
    fn test_from_lines_empty() {
        let list = FilterList::from_lines(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(labels(&list).is_empty());
    }

    #[test]
    fn test_round_trip_law() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec![""],
            vec!["+ /a"],
            vec!["+ /a", "- /b", "anything at all", "", "+ /a"],
        ];
        for input in inputs {
            let list = FilterList::from_lines(input.clone());
            assert_eq!(list.to_lines(), input);
        }
    }

    #[test]
    fn test_to_lines_sorts_by_position_not_insertion() {
        let mut list = FilterList::new();
        list.replace_all(vec![
            FilterEntry {
                label: "second".to_string(),
                position: 1,
            },
            FilterEntry {
                label: "first".to_string(),
                position: 0,
            },
        ]);
        assert_eq!(labels(&list), vec!["first", "second"]);
    }

    #[test]
    fn test_append_invariant() {
        let mut list = FilterList::from_lines(["a", "b"]);
        let before = list.ordered();
        list.append("+ /new");

        assert_eq!(list.len(), 3);
        let after = list.ordered();
        assert_eq!(after[2].label, "+ /new");
        assert_eq!(after[2].position, 2);
        // Prior entries are untouched
        assert_eq!(&after[..2], &before[..]);
    }

    #[test]
    fn test_append_to_empty() {
        let mut list = FilterList::new();
        list.append("+ /x");
        assert_eq!(list.len(), 1);
        assert_eq!(list.ordered()[0].position, 0);
        assert_eq!(labels(&list), vec!["+ /x"]);
    }

    #[test]
    fn test_remove_renumbers_densely() {
        let mut list = FilterList::from_lines(["a", "b", "c", "d"]);
        list.remove_at(1);

        assert_eq!(labels(&list), vec!["a", "c", "d"]);
        let positions: Vec<usize> = list.ordered().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_last_entry_yields_empty() {
        let mut list = FilterList::from_lines(["only"]);
        list.remove_at(0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = FilterList::from_lines(["a", "b"]);
        list.remove_at(5);
        assert_eq!(labels(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_then_export_scenario() {
        // ["a","b","c"] -> remove position 1 -> ["a","c"]
        let mut list = FilterList::from_lines(["a", "b", "c"]);
        list.remove_at(1);
        let ordered = list.ordered();
        assert_eq!(ordered[0].label, "a");
        assert_eq!(ordered[0].position, 0);
        assert_eq!(ordered[1].label, "c");
        assert_eq!(ordered[1].position, 1);
        assert_eq!(labels(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_replace_all_is_verbatim() {
        let mut list = FilterList::from_lines(["a", "b"]);
        // Widget output is trusted as-is, including its position values.
        list.replace_all(vec![
            FilterEntry {
                label: "b".to_string(),
                position: 0,
            },
            FilterEntry {
                label: "a".to_string(),
                position: 1,
            },
        ]);
        assert_eq!(labels(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_set_label_keeps_position() {
        let mut list = FilterList::from_lines(["a", "b"]);
        list.set_label(1, "edited");
        assert_eq!(labels(&list), vec!["a", "edited"]);
        assert_eq!(list.label_at(1), Some("edited"));
    }

    #[test]
    fn test_from_text_strips_trailing_newline() {
        let list = FilterList::from_text("+ /a\n- /b\n");
        assert_eq!(labels(&list), vec!["+ /a", "- /b"]);
        let positions: Vec<usize> = list.ordered().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_from_text_empty_yields_single_empty_entry() {
        // Splitting an empty string gives one empty piece; pinned so a
        // change here is a deliberate decision, not an accident.
        let list = FilterList::from_text("");
        assert_eq!(labels(&list), vec![""]);

        let list = FilterList::from_text("   \n  ");
        assert_eq!(labels(&list), vec![""]);
    }

    #[test]
    fn test_text_round_trip() {
        let list = FilterList::from_lines(["+ /a", "- /b"]);
        assert_eq!(list.to_text(), "+ /a\n- /b");
        let back = FilterList::from_text(&list.to_text());
        assert_eq!(back.to_lines(), list.to_lines());
    }
}
