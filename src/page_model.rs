//! Everything that depends on the marketplace markup: selectors, the XPath
//! of the page-count control and the parsing of a captured detail page.

use scraper::{ElementRef, Html, Selector};

use crate::cards::card_record::CardRecord;
use crate::error::ScrapeError;

pub const LISTING_ENTRY_SELECTOR: &str = "div.search-result__content > a";
pub const LAST_PAGE_XPATH: &str =
    "/html/body/div[2]/div/div/section[2]/section/section/section/div[2]/div[1]/div/a[6]/span";

pub const LOWEST_PRICE_SELECTOR: &str = "span.spotlight__price";
pub const PRODUCT_NAME_SELECTOR: &str = "h1.product-details__name";
pub const PRICE_GUIDE_SELECTOR: &str = "section.price-points.price-guide__points";
pub const PRICE_SELECTOR: &str = "span.price";

lazy_static::lazy_static! {
    static ref LOWEST_PRICE: Selector = Selector::parse(LOWEST_PRICE_SELECTOR).unwrap();
    static ref PRODUCT_NAME: Selector = Selector::parse(PRODUCT_NAME_SELECTOR).unwrap();
    static ref PRICE_GUIDE: Selector = Selector::parse(PRICE_GUIDE_SELECTOR).unwrap();
    static ref PRICE: Selector = Selector::parse(PRICE_SELECTOR).unwrap();
}

/// Raw texts of a rendered product detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub lowest_price: String,
    pub product_name: String,
    pub price_guide: Vec<String>,
}

impl DetailPage {
    pub fn parse(html: &str) -> Result<Self, ScrapeError> {
        let document = Html::parse_document(html);

        let lowest_price = first_text(&document, &LOWEST_PRICE)
            .ok_or_else(|| ScrapeError::element_not_found(LOWEST_PRICE_SELECTOR))?;
        let product_name = first_text(&document, &PRODUCT_NAME)
            .ok_or_else(|| ScrapeError::element_not_found(PRODUCT_NAME_SELECTOR))?;

        let price_guide = document
            .select(&PRICE_GUIDE)
            .next()
            .ok_or_else(|| ScrapeError::element_not_found(PRICE_GUIDE_SELECTOR))?
            .select(&PRICE)
            .map(element_text)
            .collect();

        Ok(Self {
            lowest_price,
            product_name,
            price_guide,
        })
    }

    pub fn into_record(self, date: &str) -> CardRecord {
        CardRecord::from_scraped_texts(
            &self.product_name,
            &self.lowest_price,
            &self.price_guide,
            date,
        )
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail_page() {
        let html = include_str!("test/detail_page.html");
        let page = DetailPage::parse(html).unwrap();

        assert_eq!(page.lowest_price, "$101.49");
        assert_eq!(
            page.product_name,
            "Monkey.D.Luffy (Alternate Art) - Romance Dawn"
        );
        assert_eq!(
            page.price_guide,
            vec!["$110.00", "$250.50", "$102.00", "$200.00", "$115.00", "$260.00"]
        );
    }

    #[test]
    fn test_detail_page_into_record() {
        let html = include_str!("test/detail_page.html");
        let record = DetailPage::parse(html).unwrap().into_record("2024-03-09");

        assert_eq!(record, crate::test::helpers::luffy_alternate_art());
    }

    #[test]
    fn test_short_price_guide() {
        let html = include_str!("test/detail_page_short_guide.html");
        let record = DetailPage::parse(html).unwrap().into_record("2024-03-09");

        assert_eq!(record.name, "Nami");
        assert_eq!(record.set, "One Piece Promotion Cards");
        assert_eq!(record.card_type, vec!["Promotion Pack".to_string()]);
        assert_eq!(record.current_lowest_price, None);
        assert_eq!(record.normal_market_price, Some(0.3));
        assert_eq!(record.foil_market_price, None);
        assert_eq!(record.normal_buylist_price, None);
    }

    #[test]
    fn test_missing_lowest_price() {
        let html = "<html><body><h1 class=\"product-details__name\">Nami</h1></body></html>";
        let err = DetailPage::parse(html).unwrap_err();

        assert!(err.is_missing_element());
        assert_eq!(
            err.to_string(),
            "Expected element 'span.spotlight__price' was not found"
        );
    }

    #[test]
    fn test_missing_price_guide() {
        let html = r#"<html><body>
            <span class="spotlight__price">$1.00</span>
            <h1 class="product-details__name">Nami - OP01</h1>
        </body></html>"#;
        let err = DetailPage::parse(html).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::ElementNotFound { ref selector } if selector == PRICE_GUIDE_SELECTOR
        ));
    }
}
