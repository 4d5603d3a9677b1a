use std::fmt;

use crate::utilities::string_manipulators::parse_currency;

/// The six prices shown in the price guide section of a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    NormalMarket,
    FoilMarket,
    NormalBuylist,
    FoilBuylist,
    NormalListedMedian,
    FoilListedMedian,
}

/// Which price span feeds which field. The site renders the guide in this
/// order for every card we have seen, but nothing on the page labels them.
pub const PRICE_GUIDE_SLOTS: [(PriceField, usize); 6] = [
    (PriceField::NormalMarket, 0),
    (PriceField::FoilMarket, 1),
    (PriceField::NormalBuylist, 2),
    (PriceField::FoilBuylist, 3),
    (PriceField::NormalListedMedian, 4),
    (PriceField::FoilListedMedian, 5),
];

impl PriceField {
    pub fn column_name(&self) -> &'static str {
        match self {
            PriceField::NormalMarket => "normal_market_price",
            PriceField::FoilMarket => "foil_market_price",
            PriceField::NormalBuylist => "normal_buylist_price",
            PriceField::FoilBuylist => "foil_buylist_price",
            PriceField::NormalListedMedian => "normal_listed_median_price",
            PriceField::FoilListedMedian => "foil_listed_median_price",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceGuide {
    pub normal_market: Option<f64>,
    pub foil_market: Option<f64>,
    pub normal_buylist: Option<f64>,
    pub foil_buylist: Option<f64>,
    pub normal_listed_median: Option<f64>,
    pub foil_listed_median: Option<f64>,
}

impl PriceGuide {
    /// Maps the scraped price texts onto the guide fields by slot. Slots past
    /// the end of `texts` stay absent and extra texts are ignored.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut guide = PriceGuide::default();
        for (field, slot) in PRICE_GUIDE_SLOTS {
            if let Some(text) = texts.get(slot) {
                guide.set(field, parse_currency(text.as_ref()));
            }
        }
        guide
    }

    pub fn get(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::NormalMarket => self.normal_market,
            PriceField::FoilMarket => self.foil_market,
            PriceField::NormalBuylist => self.normal_buylist,
            PriceField::FoilBuylist => self.foil_buylist,
            PriceField::NormalListedMedian => self.normal_listed_median,
            PriceField::FoilListedMedian => self.foil_listed_median,
        }
    }

    pub fn set(&mut self, field: PriceField, price: Option<f64>) {
        let slot = match field {
            PriceField::NormalMarket => &mut self.normal_market,
            PriceField::FoilMarket => &mut self.foil_market,
            PriceField::NormalBuylist => &mut self.normal_buylist,
            PriceField::FoilBuylist => &mut self.foil_buylist,
            PriceField::NormalListedMedian => &mut self.normal_listed_median,
            PriceField::FoilListedMedian => &mut self.foil_listed_median,
        };
        *slot = price;
    }
}
