//! Picks the most standard printing among catalog search results

use crate::models::CatalogEntry;

/// Slug keywords that mark special treatments of a card
pub const NON_STANDARD_KEYWORDS: [&str; 8] = [
    "borderless",
    "extended",
    "promo",
    "prerelease",
    "showcase",
    "surge",
    "serialized",
    "poster",
];

/// Number of non-standard keywords found in the slug
pub fn penalty(slug: &str) -> usize {
    let slug = slug.to_lowercase();
    NON_STANDARD_KEYWORDS
        .iter()
        .filter(|keyword| slug.contains(*keyword))
        .count()
}

/// Lowest-penalty entry; ties keep the upstream order.
pub fn resolve(entries: &[CatalogEntry]) -> Option<&CatalogEntry> {
    least_penalized(entries.iter())
}

/// Like [`resolve`], but only among entries named exactly `card_name` when there are any
pub fn resolve_named<'a>(
    entries: &'a [CatalogEntry],
    card_name: &str,
) -> Option<&'a CatalogEntry> {
    let wanted = card_name.trim();
    let exact: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| entry.name.trim().eq_ignore_ascii_case(wanted))
        .collect();

    if exact.is_empty() {
        return resolve(entries);
    }

    log::debug!(
        "{} of {} search results named exactly '{}'",
        exact.len(),
        entries.len(),
        wanted
    );
    least_penalized(exact.into_iter())
}

fn least_penalized<'a>(
    entries: impl Iterator<Item = &'a CatalogEntry>,
) -> Option<&'a CatalogEntry> {
    let mut ranked: Vec<(usize, &CatalogEntry)> = entries
        .map(|entry| (penalty(&entry.effective_slug()), entry))
        .collect();
    // sort_by_key is stable
    ranked.sort_by_key(|(score, _)| *score);
    ranked.first().map(|(_, entry)| *entry)
}
