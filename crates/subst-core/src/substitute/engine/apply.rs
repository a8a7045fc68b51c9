//! Helper functions for applying resolved values to a document

use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::Occurrences;
use crate::document::Document;

use super::tokenize::placeholder_token;

/// One occurrence of a `{name}` token in the original leaf
struct Match<'v> {
    start: usize,
    end: usize,
    name: &'v str,
    value: &'v str,
}

/// Replace tokens in a single string leaf.
///
/// Each name matches its literal `{name}` text, braces in the name included.
/// Matches are collected over the original text and spliced in one pass, so
/// inserted values are never rescanned and a value that itself contains
/// `{...}` text stays literal. Overlapping matches resolve leftmost first,
/// longest token on a tie. Returns `Cow::Borrowed` when nothing matched.
pub(crate) fn substitute_str<'a>(
    text: &'a str,
    values: &IndexMap<String, String>,
    occurrences: Occurrences,
) -> Cow<'a, str> {
    let mut matches = Vec::new();
    for (name, value) in values {
        let token = placeholder_token(name);
        matches.extend(text.match_indices(token.as_str()).map(|(start, found)| Match {
            start,
            end: start + found.len(),
            name: name.as_str(),
            value: value.as_str(),
        }));
    }

    if matches.is_empty() {
        return Cow::Borrowed(text);
    }

    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut output = String::with_capacity(text.len());
    let mut copied_to = 0;
    let mut replaced: HashSet<&str> = HashSet::new();

    for found in matches {
        if found.start < copied_to {
            continue;
        }

        if occurrences == Occurrences::First && !replaced.insert(found.name) {
            continue;
        }

        output.push_str(&text[copied_to..found.start]);
        output.push_str(found.value);
        copied_to = found.end;
    }

    output.push_str(&text[copied_to..]);
    Cow::Owned(output)
}

/// Apply every resolved value to every string leaf of `document`
pub(crate) fn apply_values(
    document: &mut Document,
    values: &IndexMap<String, String>,
    occurrences: Occurrences,
) {
    if values.is_empty() {
        return;
    }

    document.for_each_str_mut(&mut |leaf| {
        if let Cow::Owned(rewritten) = substitute_str(leaf, values, occurrences) {
            *leaf = rewritten;
        }
    });
}
