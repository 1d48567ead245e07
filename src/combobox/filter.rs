use std::{iter, ops::Range};

use regex::Regex;

use crate::combobox::option::SelectOption;

/// A piece of display text, flagged when it matches the search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: true,
        }
    }
}

/// Returns `true` if the query should be treated as "no filter".
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Returns the indices of the options matching `query`, in original order.
///
/// A blank query keeps every option. Otherwise an option is kept when the
/// lowercased query is a substring of its lowercased label or description.
///
/// # Examples
/// ```
/// # use invpick::combobox::{filter::filter_indices, option::SelectOption};
/// let options = vec![
///     SelectOption::new("a1", "Projector").with_description("AV Room"),
///     SelectOption::new("a2", "Chair").with_description("Sanctuary"),
/// ];
/// assert_eq!(filter_indices(&options, "proj"), vec![0]);
/// assert_eq!(filter_indices(&options, "   "), vec![0, 1]);
/// ```
pub fn filter_indices(options: &[SelectOption], query: &str) -> Vec<usize> {
    if is_blank(query) {
        return (0..options.len()).collect();
    }

    let needle = fold(query);

    options
        .iter()
        .enumerate()
        .filter(|(_, option)| matches(option, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches(option: &SelectOption, needle: &str) -> bool {
    fold(&option.label).contains(needle)
        || option
            .description
            .as_ref()
            .is_some_and(|d| fold(d).contains(needle))
}

/// Lowercases `text` one character at a time. Filtering and marking both
/// compare through this, so every kept option has a marked occurrence.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Same as [`fold`], also returning, for every byte of the folded text, the
/// byte range of the character of `text` it came from.
fn fold_with_origin(text: &str) -> (String, Vec<Range<usize>>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());

    for (start, c) in text.char_indices() {
        let range = start..start + c.len_utf8();
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(iter::repeat_n(range.clone(), lower.len_utf8()));
        }
    }

    (folded, origin)
}

/// Splits `text` into segments, marking every non-overlapping,
/// case-insensitive occurrence of `query`, compared the same way as
/// [`filter_indices`].
///
/// The query is matched literally. A blank query yields the text as a
/// single unmarked segment.
pub fn mark_matches(text: &str, query: &str) -> Vec<Segment> {
    if is_blank(query) || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(re) = Regex::new(&regex::escape(&fold(query))) else {
        return vec![Segment::plain(text)];
    };

    let (folded, origin) = fold_with_origin(text);
    let mut segments = Vec::new();
    let mut last = 0;

    for m in re.find_iter(&folded) {
        // a match inside a multi-char lowercase expands to the whole character
        let start = origin[m.start()].start.max(last);
        let end = origin[m.end() - 1].end;
        if end <= start {
            continue;
        }

        if start > last {
            segments.push(Segment::plain(&text[last..start]));
        }
        segments.push(Segment::marked(&text[start..end]));
        last = end;
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}
