//! Template expansion over the closed placeholder vocabulary.
//!
//! Templates are free-form text (usually HTML) in which placeholder tokens
//! appear as plain substrings, with no surrounding delimiters:
//!
//! ```text
//! <a href="$LARGE_URL"><img src="$SMALL_URL" alt="$SAFE_TITLE"></a>
//! ```
//!
//! Matching is case-insensitive and, where tokens overlap (`$TIME` is a
//! prefix of `$TIMESTAMP`), the longest token at a position wins. `$`-text
//! that is not a known token is copied through unchanged. Values are
//! inserted verbatim: no HTML escaping happens here, which is why the map
//! offers `$SAFE_*` variants.
//!
//! The matcher is an Aho-Corasick automaton over [`Placeholder::ALL`], built
//! once per process and shared by every expansion.

use crate::placeholders::{Placeholder, PlaceholderMap};
use aho_corasick::{AhoCorasick, MatchKind};
use std::sync::LazyLock;

static SHARED: LazyLock<Expander> = LazyLock::new(Expander::new);

/// Precompiled matcher for every placeholder token.
#[derive(Debug, Clone)]
pub struct Expander {
    matcher: AhoCorasick,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    pub fn new() -> Self {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(Placeholder::ALL.iter().map(|p| p.token()))
            .expect("placeholder tokens form a valid automaton");
        Self { matcher }
    }

    /// Shared instance, compiled on first use.
    pub fn shared() -> &'static Expander {
        &SHARED
    }

    /// Substitute every placeholder occurrence in `template` with its value.
    pub fn expand(&self, template: &str, values: &PlaceholderMap) -> String {
        let mut out = String::with_capacity(template.len());
        self.matcher
            .replace_all_with(template, &mut out, |mat, _, dst| {
                dst.push_str(values.get(Placeholder::ALL[mat.pattern().as_usize()]));
                true
            });
        out
    }

    /// Placeholders referenced by `template`, in first-use order, without repeats.
    pub fn placeholders_in(&self, template: &str) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for mat in self.matcher.find_iter(template) {
            let placeholder = Placeholder::ALL[mat.pattern().as_usize()];
            if !seen.contains(&placeholder) {
                seen.push(placeholder);
            }
        }
        seen
    }
}

/// Expand `template` with the shared [`Expander`].
///
/// # Examples
/// ```
/// # use embedder::placeholders::{Placeholder, PlaceholderMap};
/// # use embedder::template::expand;
/// let mut values = PlaceholderMap::new();
/// values.set(Placeholder::Title, "My <Trip>");
/// assert_eq!(expand("<a>$TITLE</a>", &values), "<a>My <Trip></a>");
/// ```
pub fn expand(template: &str, values: &PlaceholderMap) -> String {
    Expander::shared().expand(template, values)
}
