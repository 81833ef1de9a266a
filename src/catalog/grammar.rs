//! Offer Grammar
//!
//! Parses the offer column of a price table:
//!
//! - `3A for 130, 5A for 200` (bulk bundles)
//! - `2E get one B free` (free items, count as digits or a word up to ten)
//! - `buy any 3 of (S,T,X,Y,Z) for 45` (group bundles)
//!
//! Offers in one cell are separated by commas outside parentheses.

use smallvec::SmallVec;

use crate::{
    catalog::{
        CatalogError,
        definition::{OfferDefinition, word_number},
    },
    items::ItemCode,
};

/// Parse every offer in a price table cell. Blank cells yield no offers.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidOffer`] naming the first offer that does not
/// match the grammar.
pub fn parse_offers(text: &str) -> Result<Vec<OfferDefinition>, CatalogError> {
    split_top_level(text)
        .into_iter()
        .map(str::trim)
        .filter(|offer| !offer.is_empty())
        .map(parse_offer)
        .collect()
}

/// Parse a single offer.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidOffer`] if the text does not match the grammar.
pub fn parse_offer(text: &str) -> Result<OfferDefinition, CatalogError> {
    let text = text.trim();

    let parsed = match text.strip_prefix("buy any ") {
        Some(rest) => parse_group(rest),
        None => parse_bundle(text),
    };

    parsed.ok_or_else(|| CatalogError::InvalidOffer(text.to_string()))
}

fn parse_bundle(text: &str) -> Option<OfferDefinition> {
    let words: SmallVec<[&str; 5]> = text.split_whitespace().collect();

    match words.as_slice() {
        [lead, "for", price] => {
            let (quantity, code) = quantity_and_code(lead)?;

            Some(OfferDefinition::Bulk {
                code,
                quantity,
                price: price.parse().ok()?,
            })
        }
        [lead, "get", count, target, "free"] => {
            let (trigger_quantity, trigger) = quantity_and_code(lead)?;

            let target_quantity = count.parse().ok().or_else(|| word_number(count))?;

            Some(OfferDefinition::FreeItem {
                trigger,
                trigger_quantity,
                target: ItemCode::new(*target).ok()?,
                target_quantity,
            })
        }
        _ => None,
    }
}

fn parse_group(rest: &str) -> Option<OfferDefinition> {
    let (quantity, rest) = rest.split_once(" of ")?;
    let (members, price) = rest.rsplit_once(" for ")?;

    let members = members
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?
        .split(',')
        .map(|member| ItemCode::new(member.trim()).ok())
        .collect::<Option<Vec<_>>>()?;

    Some(OfferDefinition::Group {
        members,
        quantity: quantity.trim().parse().ok()?,
        price: price.trim().parse().ok()?,
    })
}

/// Split `10H` into `(10, H)`.
fn quantity_and_code(lead: &str) -> Option<(u64, ItemCode)> {
    let split = lead.find(|c: char| !c.is_ascii_digit())?;
    let (quantity, code) = lead.split_at(split);

    Some((quantity.parse().ok()?, ItemCode::new(code).ok()?))
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text.get(start..idx).unwrap_or_default());
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(text.get(start..).unwrap_or_default());

    parts
}
