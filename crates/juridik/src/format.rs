//! Text sanitizing for archival filenames.
//!
//! Filenames have to survive every file system the archive is synced to, so they are
//! reduced to plain ASCII letters, digits, spaces and `,.-`. Swedish letters are
//! transliterated through a fixed table before any generic decomposition takes place, so
//! that `ö` becomes `oe` rather than just `o`.
//!
//! [`sanitize_for_filename`] is idempotent: feeding its output back in with the same
//! limit returns the same string.

use unicode_normalization::UnicodeNormalization;

/// Known diacritics and their ASCII replacements, applied before decomposition.
const TRANSLITERATIONS: &[(char, &str)] = &[
  ('å', "a"),
  ('ä', "a"),
  ('ö', "oe"),
  ('Å', "A"),
  ('Ä', "A"),
  ('Ö', "Oe"),
  ('é', "e"),
  ('è', "e"),
  ('ü', "u"),
  ('ß', "ss"),
];

/// Characters trimmed from the end after truncation.
const TRAILING_JUNK: &[char] = &[' ', '.', '-', ','];

/// Reduces `text` to a filename-safe string of at most `max_length` characters.
///
/// 1. Transliterate the fixed diacritic table
/// 2. Decompose the rest (NFKD) and drop anything that is not ASCII
/// 3. Keep only alphanumerics, whitespace, `,`, `.` and `-`
/// 4. Collapse whitespace runs to one space and trim
/// 5. Truncate and strip trailing spaces, periods, hyphens and commas
///
/// # Examples
///
/// ```
/// use juridik::format::sanitize_for_filename;
///
/// assert_eq!(sanitize_for_filename("Skuldebrev, växel och check", 60), "Skuldebrev, vaxel och check");
/// assert_eq!(sanitize_for_filename("Köplagen: en kommentar?", 60), "Koeplagen en kommentar");
/// ```
pub fn sanitize_for_filename(text: &str, max_length: usize) -> String {
  let transliterated = text.chars().fold(String::with_capacity(text.len()), |mut acc, c| {
    match TRANSLITERATIONS.iter().find(|(from, _)| *from == c) {
      Some((_, to)) => acc.push_str(to),
      None => acc.push(c),
    }
    acc
  });

  let kept: String = transliterated
    .nfkd()
    .filter(char::is_ascii)
    .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
    .collect();

  let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
  let truncated: String = collapsed.chars().take(max_length).collect();
  truncated.trim_end_matches(TRAILING_JUNK).to_string()
}
