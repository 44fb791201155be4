//! Display-name normalization

/// Connector words kept lowercase when they follow a space
const LOWERCASE_CONNECTORS: [(&str, &str); 2] = [("Of", "of"), ("And", "and")];

/// Title-case a string
///
/// The first letter of every run of letters is uppercased and the remaining
/// letters of the run are lowercased; all other characters are unchanged.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Normalize a school name for display
///
/// Title-cases the name, then lowercases the whole words "of" and "and"
/// wherever they follow a space.
///
/// ```
/// use prestige_dash::algorithm::normalize_school_name;
///
/// assert_eq!(
///     normalize_school_name("UNIVERSITY OF TEXAS AND M COLLEGE"),
///     "University of Texas and M College"
/// );
/// ```
#[must_use]
pub fn normalize_school_name(name: &str) -> String {
    let titled = title_case(name);
    titled
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                return word;
            }
            LOWERCASE_CONNECTORS
                .iter()
                .find(|(from, _)| *from == word)
                .map_or(word, |&(_, to)| to)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
