// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Did-you-mean suggestions for unresolved names.

/// Find the closest match for `name` among `candidates`.
///
/// Ties keep the earliest candidate, so declaration order decides.
pub fn closest_match<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let max_distance = match name.len() {
        0..=2 => 1,
        3..=5 => 2,
        _ => 3,
    };

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if name.len().abs_diff(candidate.len()) > max_distance {
            continue;
        }
        let dist = strsim::levenshtein(name, candidate);
        if dist <= max_distance && best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(closest, _)| closest)
}

/// `Some("did you mean `closest`?")` if a close match exists.
pub fn did_you_mean<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    closest_match(name, candidates).map(|closest| format!("did you mean `{}`?", closest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_you_mean() {
        let candidates = ["number", "name", "enabled"];

        assert_eq!(
            did_you_mean("numbr", candidates.iter().copied()),
            Some("did you mean `number`?".to_string())
        );
        assert_eq!(did_you_mean("nme", candidates.iter().copied()), Some("did you mean `name`?".to_string()));
        assert_eq!(did_you_mean("xyz", candidates.iter().copied()), None);
    }

    #[test]
    fn ties_keep_declaration_order() {
        assert_eq!(closest_match("ab", ["aa", "bb"]), Some("aa"));
    }
}
