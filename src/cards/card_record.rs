use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::price::{PriceField, PriceGuide, PRICE_GUIDE_SLOTS};
use crate::utilities::string_manipulators::{
    extract_card_name, extract_card_types, extract_set_name, parse_currency,
};

/// Output columns, in file order.
pub const CARD_RECORD_COLUMNS: [&str; 12] = [
    "full_product_name",
    "name",
    "type",
    "set",
    "current_lowest_price",
    "normal_market_price",
    "foil_market_price",
    "normal_buylist_price",
    "foil_buylist_price",
    "normal_listed_median_price",
    "foil_listed_median_price",
    "date",
];

/// One scraped product. Absent prices are `None` and written as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub full_product_name: String,
    pub name: String,
    #[serde(rename = "type", with = "card_types_as_json")]
    pub card_type: Vec<String>,
    pub set: String,
    #[serde(deserialize_with = "finite_price")]
    pub current_lowest_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub normal_market_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub foil_market_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub normal_buylist_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub foil_buylist_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub normal_listed_median_price: Option<f64>,
    #[serde(deserialize_with = "finite_price")]
    pub foil_listed_median_price: Option<f64>,
    pub date: String,
}

impl CardRecord {
    pub fn new(
        full_product_name: &str,
        current_lowest_price: Option<f64>,
        prices: PriceGuide,
        date: &str,
    ) -> Self {
        Self {
            full_product_name: full_product_name.to_string(),
            name: extract_card_name(full_product_name),
            card_type: extract_card_types(full_product_name),
            set: extract_set_name(full_product_name).unwrap_or_default(),
            current_lowest_price,
            normal_market_price: prices.normal_market,
            foil_market_price: prices.foil_market,
            normal_buylist_price: prices.normal_buylist,
            foil_buylist_price: prices.foil_buylist,
            normal_listed_median_price: prices.normal_listed_median,
            foil_listed_median_price: prices.foil_listed_median,
            date: date.to_string(),
        }
    }

    /// Builds a record straight from the texts scraped off a detail page.
    pub fn from_scraped_texts<S: AsRef<str>>(
        full_product_name: &str,
        lowest_price_text: &str,
        price_texts: &[S],
        date: &str,
    ) -> Self {
        Self::new(
            full_product_name.trim(),
            parse_currency(lowest_price_text),
            PriceGuide::from_texts(price_texts),
            date,
        )
    }

    pub fn prices(&self) -> PriceGuide {
        PriceGuide {
            normal_market: self.normal_market_price,
            foil_market: self.foil_market_price,
            normal_buylist: self.normal_buylist_price,
            foil_buylist: self.foil_buylist_price,
            normal_listed_median: self.normal_listed_median_price,
            foil_listed_median: self.foil_listed_median_price,
        }
    }

    /// Guide prices that are populated but below the current lowest listing.
    pub fn prices_below_lowest(&self) -> Vec<PriceField> {
        let Some(lowest) = self.current_lowest_price else {
            return Vec::new();
        };
        let prices = self.prices();
        PRICE_GUIDE_SLOTS
            .iter()
            .map(|(field, _)| *field)
            .filter(|field| prices.get(*field).is_some_and(|price| price < lowest))
            .collect()
    }

    /// Which columns are missing a value, in `CARD_RECORD_COLUMNS` order.
    /// Empty strings count as missing, an empty type list does not.
    pub fn missing_columns(&self) -> [bool; 12] {
        let prices = self.prices();
        [
            self.full_product_name.is_empty(),
            self.name.is_empty(),
            false,
            self.set.is_empty(),
            self.current_lowest_price.is_none(),
            prices.normal_market.is_none(),
            prices.foil_market.is_none(),
            prices.normal_buylist.is_none(),
            prices.foil_buylist.is_none(),
            prices.normal_listed_median.is_none(),
            prices.foil_listed_median.is_none(),
            self.date.is_empty(),
        ]
    }
}

impl Eq for CardRecord {}

// Prices hash by bit pattern, which agrees with `==` since stored prices are always finite.
impl Hash for CardRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_product_name.hash(state);
        self.name.hash(state);
        self.card_type.hash(state);
        self.set.hash(state);
        for price in [
            self.current_lowest_price,
            self.normal_market_price,
            self.foil_market_price,
            self.normal_buylist_price,
            self.foil_buylist_price,
            self.normal_listed_median_price,
            self.foil_listed_median_price,
        ] {
            price
                .map(|p| if p == 0.0 { 0.0f64.to_bits() } else { p.to_bits() })
                .hash(state);
        }
        self.date.hash(state);
    }
}

/// Reads a price cell, treating `NaN` and infinities like an empty cell.
fn finite_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let price = Option::<f64>::deserialize(deserializer)?;
    Ok(price.filter(|amount| amount.is_finite()))
}

mod card_types_as_json {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(types: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let json = serde_json::to_string(types).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = String::deserialize(deserializer)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(serde::de::Error::custom)
    }
}
