//! Shared catalog classification for the astro gallery tools.
//!
//! The browser tab filter and the static gallery sorter both bucket cards by
//! their title text; this crate holds that logic so the two tools stay in
//! agreement on what counts as a Messier or NGC object.

use serde::{Deserialize, Serialize};

/// Classification bucket for a gallery card, derived once from its title.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Messier,
    Ngc,
    Other,
}

impl Catalog {
    /// Returns the catalog name as written into the `data-catalog` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Catalog::Messier => "messier",
            Catalog::Ngc => "ngc",
            Catalog::Other => "other",
        }
    }

    /// Parse a `data-catalog` attribute value. Unknown values fall back to
    /// `Other`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "messier" => Catalog::Messier,
            "ngc" => Catalog::Ngc,
            _ => Catalog::Other,
        }
    }
}

/// Classify a card title into its catalog bucket.
///
/// Total and deterministic: a Messier designation (`M`, optional whitespace,
/// digits, anchored at the start) wins over an NGC designation (`NGC`,
/// optional whitespace, digits, anchored at the start); anything else,
/// including an empty title, is `Other`. Matching is case-insensitive and the
/// title is trimmed first.
pub fn classify_title(title: &str) -> Catalog {
    let title = title.trim();
    if has_designation(title, "m") {
        Catalog::Messier
    } else if has_designation(title, "ngc") {
        Catalog::Ngc
    } else {
        Catalog::Other
    }
}

/// True if `title` starts with `prefix` (case-insensitive), then optional
/// whitespace, then at least one digit.
fn has_designation(title: &str, prefix: &str) -> bool {
    let Some(rest) = strip_prefix_ignore_case(title, prefix) else {
        return false;
    };
    rest.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Per-catalog card totals for one grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub all: usize,
    pub messier: usize,
    pub ngc: usize,
    pub other: usize,
}

impl CatalogCounts {
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        let mut counts = Self::default();
        for catalog in catalogs {
            counts.all += 1;
            match catalog {
                Catalog::Messier => counts.messier += 1,
                Catalog::Ngc => counts.ngc += 1,
                Catalog::Other => counts.other += 1,
            }
        }
        counts
    }
}

/// Rendered label for a tab with the given `data-filter` value.
///
/// Only the `all`, `messier` and `ngc` tabs are label-managed; any other
/// filter value (there is no `Other` tab today) returns `None` and the tab
/// keeps its authored text.
pub fn tab_label(filter: &str, counts: &CatalogCounts) -> Option<String> {
    match filter {
        "all" => Some(format!("All ({})", counts.all)),
        "messier" => Some(format!("Messier ({})", counts.messier)),
        "ngc" => Some(format!("NGC ({})", counts.ngc)),
        _ => None,
    }
}

/// Visibility rule for the active filter: a card is shown iff the filter is
/// `all` or names the card's own catalog.
pub fn filter_shows(filter: &str, catalog: Catalog) -> bool {
    filter == "all" || filter == catalog.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_messier() {
        assert_eq!(classify_title("M31"), Catalog::Messier);
        assert_eq!(classify_title("M 31"), Catalog::Messier);
        assert_eq!(classify_title("m31"), Catalog::Messier);
        assert_eq!(classify_title("  M42 Orion Nebula  "), Catalog::Messier);
    }

    #[test]
    fn test_classify_ngc() {
        assert_eq!(classify_title("NGC 224"), Catalog::Ngc);
        assert_eq!(classify_title("ngc224"), Catalog::Ngc);
        assert_eq!(classify_title("NGC 7000 (North America)"), Catalog::Ngc);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_title("Andromeda Galaxy"), Catalog::Other);
        assert_eq!(classify_title(""), Catalog::Other);
        assert_eq!(classify_title("M"), Catalog::Other);
        assert_eq!(classify_title("Messier 31"), Catalog::Other);
        assert_eq!(classify_title("NGC"), Catalog::Other);
        // A bare number is not a designation.
        assert_eq!(classify_title("42"), Catalog::Other);
    }

    #[test]
    fn test_designation_priority() {
        // The Messier check runs first; "M..." never reaches the NGC check.
        assert_eq!(classify_title("M 81 near NGC 3031"), Catalog::Messier);
    }

    #[test]
    fn test_catalog_str_round_trip() {
        for catalog in [Catalog::Messier, Catalog::Ngc, Catalog::Other] {
            assert_eq!(Catalog::from_str(catalog.as_str()), catalog);
        }
        assert_eq!(Catalog::from_str("caldwell"), Catalog::Other);
    }

    #[test]
    fn test_counts() {
        let counts = CatalogCounts::from_catalogs(
            ["M1", "NGC 7000", "Horsehead Nebula"]
                .iter()
                .map(|t| classify_title(t)),
        );
        assert_eq!(counts.all, 3);
        assert_eq!(counts.messier, 1);
        assert_eq!(counts.ngc, 1);
        assert_eq!(counts.other, 1);
        assert!(counts.messier + counts.ngc <= counts.all);
    }

    #[test]
    fn test_tab_labels() {
        let counts = CatalogCounts {
            all: 3,
            messier: 1,
            ngc: 1,
            other: 1,
        };
        assert_eq!(tab_label("all", &counts).as_deref(), Some("All (3)"));
        assert_eq!(tab_label("messier", &counts).as_deref(), Some("Messier (1)"));
        assert_eq!(tab_label("ngc", &counts).as_deref(), Some("NGC (1)"));
        // No label is managed for the "other" bucket or unknown filters.
        assert_eq!(tab_label("other", &counts), None);
        assert_eq!(tab_label("favorites", &counts), None);
    }

    #[test]
    fn test_filter_shows() {
        assert!(filter_shows("all", Catalog::Messier));
        assert!(filter_shows("all", Catalog::Other));
        assert!(filter_shows("messier", Catalog::Messier));
        assert!(!filter_shows("messier", Catalog::Ngc));
        assert!(!filter_shows("ngc", Catalog::Other));
        // A filter naming no catalog hides everything.
        assert!(!filter_shows("favorites", Catalog::Messier));
        assert!(!filter_shows("favorites", Catalog::Other));
    }
}
