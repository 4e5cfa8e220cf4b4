//! Star-label extraction from narrative/markup text.
//!
//! Korean and Japanese documents render labels as a single-glyph bracketed
//! suffix (`귀문관살(중)`, `鬼門関殺(中)`); the English document uses a
//! free-text parenthetical after the localized name (`Spirit Gate …
//! (Neutral)`).

use regex::Regex;
use sajulint_kernel::catalog::RuleCatalog;
use sajulint_kernel::lang::Lang;
use std::collections::BTreeMap;

/// Extract each star's label token from `lang`'s document, keyed by the
/// star's canonical name. Stars without a surface form in `lang`, or whose
/// pattern is absent, are omitted.
pub fn extract_star_labels(
    doc: &str,
    lang: Lang,
    catalog: &RuleCatalog,
) -> BTreeMap<&'static str, String> {
    let mut out = BTreeMap::new();
    for star in &catalog.stars {
        let Some(surface) = star.surface(lang) else {
            continue;
        };
        let pattern = match lang {
            Lang::Ko => format!(r"{surface}\(([흉중길])\)"),
            Lang::En => format!(r"{}[^)]*\(([^)]+)\)", regex::escape(surface)),
            Lang::Jp => format!(r"{surface}\(([吉中凶])\)"),
        };
        let re = Regex::new(&pattern).expect("star label regex");
        if let Some(caps) = re.captures(doc) {
            out.insert(star.name, caps[1].trim().to_string());
        }
    }
    out
}
