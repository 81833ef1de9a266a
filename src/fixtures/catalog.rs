//! Catalog Fixtures

use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogBuilder},
    fixtures::FixtureError,
};

/// Price table as stored in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code for every price (e.g., "GBP")
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Items, in the order they appear in the table
    pub items: Vec<ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Item code (e.g., "A")
    pub code: String,

    /// Unit price in minor units
    pub price: u64,

    /// Offer text (e.g., "3A for 130, 5A for 200")
    #[serde(default)]
    pub offers: Option<String>,
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut builder = CatalogBuilder::new(parse_currency(&fixture.currency)?);

        // Items first, so offers may name items further down the table.
        for item in &fixture.items {
            builder.item(&item.code, item.price)?;
        }

        for offers in fixture.items.iter().filter_map(|item| item.offers.as_deref()) {
            builder.offers_from_str(offers)?;
        }

        Ok(builder.build()?)
    }
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if `code` is not an ISO 4217 code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    let code = code.trim();

    iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}
