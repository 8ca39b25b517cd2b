//! Author names and their decomposition into first and last name.
//!
//! Two notations reach the harvester:
//!
//! - juridikbok.se prints names naturally: `"Antonina Bakardjieva Engelbrekt"`. The first
//!   token is the given name and everything after it is the surname, which keeps
//!   multi-word Swedish surnames intact.
//! - LIBRIS prints names inverted with an optional lifespan: `"Rodhe, Knut, 1909-1999."`.
//!
//! Both parsers are total. Empty or malformed input degrades to the sentinel author
//! rather than failing.
//!
//! # Examples
//!
//! ```
//! use juridik::author::{parse_author_name, parse_inverted_author_name};
//!
//! let author = parse_author_name("Antonina Bakardjieva Engelbrekt");
//! assert_eq!(author.first, "Antonina");
//! assert_eq!(author.last, "Bakardjieva Engelbrekt");
//!
//! let author = parse_inverted_author_name("Rodhe, Knut, 1909-1999");
//! assert_eq!(author.full, "Knut Rodhe");
//! ```

use super::*;

/// Placeholder used when no author name is available.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A single author, decomposed for citation and filename use.
///
/// `last` and `full` are never empty; a missing name is represented by
/// [`Author::unknown`]. Authors are replaced wholesale, never edited, which is how
/// enrichment upgrades a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Given name(s), empty when only a single name is known
  pub first: String,
  /// Surname, possibly several words
  pub last:  String,
  /// The name as it is printed in a full citation
  pub full:  String,
}

impl Author {
  /// The sentinel author substituted for an absent name.
  pub fn unknown() -> Self {
    Self {
      first: String::new(),
      last:  UNKNOWN_AUTHOR.to_string(),
      full:  UNKNOWN_AUTHOR.to_string(),
    }
  }

  /// Whether this is the sentinel author.
  pub fn is_unknown(&self) -> bool { self.first.is_empty() && self.last == UNKNOWN_AUTHOR }
}

impl Display for Author {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.full) }
}

/// Splits a naturally ordered name into first and last name.
///
/// - no tokens: [`Author::unknown`]
/// - one token: that token is the surname
/// - two or more: the first token is the given name, the rest joined by single spaces is
///   the surname
pub fn parse_author_name(full_name: &str) -> Author {
  let parts: Vec<&str> = full_name.split_whitespace().collect();
  match parts.as_slice() {
    [] => Author::unknown(),
    [single] => Author { first: String::new(), last: single.to_string(), full: single.to_string() },
    [first, rest @ ..] => Author {
      first: first.to_string(),
      last:  rest.join(" "),
      full:  parts.join(" "),
    },
  }
}

/// Parses the inverted `Last, First, birth-death.` notation used by LIBRIS.
///
/// A trailing lifespan (`, 1909-1999`, open-ended `, 1952-`, optionally followed by
/// periods) is stripped first. The rest is split on its first comma into surname and
/// given name. Without a comma the cleaned string goes through [`parse_author_name`].
pub fn parse_inverted_author_name(name: &str) -> Author {
  lazy_static! {
    static ref LIFESPAN: Regex = Regex::new(r",\s*\d{4}-\d{0,4}\.{0,3}\s*$").unwrap();
  }

  let cleaned = LIFESPAN.replace(name, "");
  let cleaned = cleaned.trim();

  match cleaned.split_once(',') {
    Some((last, first)) => {
      let last = last.trim();
      let first = first.trim();
      if last.is_empty() {
        return parse_author_name(first);
      }
      let full = if first.is_empty() { last.to_string() } else { format!("{first} {last}") };
      Author { first: first.to_string(), last: last.to_string(), full }
    },
    None => parse_author_name(cleaned),
  }
}
