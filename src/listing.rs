//! Record type for one listed car
//!
//! Fields are raw extracted text; no numeric parsing or normalization
//! happens at this layer. An element that is absent from an item block
//! leaves its field as an empty string.

/// Header labels of the report, in column order
pub const HEADER: [&str; 6] = ["Наименование", "Цена", "Год", "Пробег", "ID", "Ссылка"];

/// One extracted listing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Car title, the text of the item's title link
    pub title: String,

    /// Price text as displayed
    pub price: String,

    /// Production year text as displayed
    pub year: String,

    /// Mileage text as displayed
    pub mileage: String,

    /// Hyphenated model identifier captured from the link path, e.g.
    /// `audi-a4`; empty when the path has no such segment
    pub category: String,

    /// Raw href of the title link, relative or absolute as the markup had it
    pub url: String,
}

impl Listing {
    /// Returns the record as one report row, in `HEADER` column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.price.clone(),
            self.year.clone(),
            self.mileage.clone(),
            self.category.clone(),
            self.url.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_matches_header_order() {
        let listing = Listing {
            title: "Audi A4".to_string(),
            price: "1 500 000 ₽".to_string(),
            year: "2018".to_string(),
            mileage: "85 000 км".to_string(),
            category: "audi-a4".to_string(),
            url: "/cars/used/sale/audi-a4/1115/".to_string(),
        };

        let row = listing.to_row();
        assert_eq!(row.len(), HEADER.len());
        assert_eq!(row[0], "Audi A4");
        assert_eq!(row[1], "1 500 000 ₽");
        assert_eq!(row[2], "2018");
        assert_eq!(row[3], "85 000 км");
        assert_eq!(row[4], "audi-a4");
        assert_eq!(row[5], "/cars/used/sale/audi-a4/1115/");
    }

    #[test]
    fn test_header_has_six_columns() {
        assert_eq!(HEADER.len(), 6);
        assert_eq!(HEADER[0], "Наименование");
        assert_eq!(HEADER[5], "Ссылка");
    }
}
