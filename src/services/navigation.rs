/// Default number of neighbouring entries shown around the current step.
pub const DEFAULT_RANGE: usize = 5;

/// One slot of a navigation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEntry<T> {
    Item(T),
    /// Rendered as `…`: one or more entries were left out here.
    Gap,
}

impl<T> WindowEntry<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

/// Compact view of `items` around `current_index`.
///
/// Shows about `range` entries centered on the current one, plus the first and
/// last entries, with a [`WindowEntry::Gap`] wherever entries were skipped.
/// When `items` has at most `range` entries they are all returned.
pub fn window<T>(items: &[T], current_index: usize, range: usize) -> Vec<WindowEntry<&T>> {
    let len = items.len();
    if len == 0 {
        return Vec::new();
    }

    let (lenf, rangef, current) = (len as f64, range as f64, current_index as f64);
    let half = rangef / 2.0;
    let end = (current + half).max(rangef).min(lenf).round() as usize;
    let start = ((current - half).min(lenf - rangef).max(0.0).round() as usize).min(end);

    let mut entries = Vec::with_capacity(end - start + 4);
    if start > 0 {
        entries.push(WindowEntry::Item(&items[0]));
    }
    if start > 1 {
        entries.push(WindowEntry::Gap);
    }
    entries.extend(items[start..end].iter().map(WindowEntry::Item));
    if end + 1 < len {
        entries.push(WindowEntry::Gap);
    }
    if end < len {
        entries.push(WindowEntry::Item(&items[len - 1]));
    }

    entries
}
