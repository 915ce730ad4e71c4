//! Chooses the cheapest acceptable listing for a catalog entry

use crate::models::{ConditionRank, Listing, PriceQuote};

/// Placeholder condition for a fallback listing that declares none
pub const UNKNOWN_CONDITION: &str = "unknown";

/// Which listings are acceptable for a run
#[derive(Debug, Clone)]
pub struct ListingFilter {
    pub language: String,
    pub foil: bool,
    pub conditions: ConditionRank,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            foil: false,
            conditions: ConditionRank::default(),
        }
    }
}

impl ListingFilter {
    /// Availability, language and foil checks; unset properties always pass
    pub fn accepts(&self, listing: &Listing) -> bool {
        if listing.on_vacation {
            return false;
        }
        let props = &listing.properties_hash;
        if let Some(language) = props.mtg_language.as_deref() {
            if !language.eq_ignore_ascii_case(&self.language) {
                return false;
            }
        }
        if let Some(foil) = props.mtg_foil {
            if foil != self.foil {
                return false;
            }
        }
        true
    }
}

/// Outcome of listing selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Quote(PriceQuote),
    NoMatchingListing,
}

/// Select the cheapest listing of the best available condition.
///
/// Falls back to the cheapest surviving listing of any condition when no
/// preferred grade is on offer. Equal prices resolve to the first listing seen.
pub fn select(listings: &[Listing], filter: &ListingFilter) -> Selection {
    let priced: Vec<(&Listing, f64)> = listings
        .iter()
        .filter(|listing| filter.accepts(listing))
        .filter_map(|listing| match listing.price() {
            Some(price) => Some((listing, price)),
            None => {
                log::debug!("Listing {} has no usable price, skipping", listing.id);
                None
            }
        })
        .collect();

    log::debug!(
        "{} of {} listings pass language/foil/availability filters",
        priced.len(),
        listings.len()
    );

    for grade in filter.conditions.grades() {
        let group = priced
            .iter()
            .filter(|(listing, _)| listing.condition() == Some(grade.as_str()));
        if let Some((listing, price)) = cheapest(group) {
            return Selection::Quote(PriceQuote {
                listing: listing.clone(),
                condition: grade.clone(),
                price,
            });
        }
    }

    match cheapest(priced.iter()) {
        Some((listing, price)) => {
            log::info!("No listing in a preferred condition, using cheapest overall");
            Selection::Quote(PriceQuote {
                listing: listing.clone(),
                condition: listing
                    .condition()
                    .unwrap_or(UNKNOWN_CONDITION)
                    .to_string(),
                price,
            })
        }
        None => Selection::NoMatchingListing,
    }
}

fn cheapest<'a, 'b>(
    candidates: impl Iterator<Item = &'b (&'a Listing, f64)>,
) -> Option<(&'a Listing, f64)>
where
    'a: 'b,
{
    // min_by returns the first of several equal minima
    candidates
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(listing, price)| (*listing, *price))
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
