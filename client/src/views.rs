use tabled::{Table, Tabled};

use crate::forms::date_input;
use crate::listing::Listing;

/// One card of the listings grid.
#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "Company")]
    company: String,

    #[tabled(rename = "Position")]
    position: String,

    #[tabled(rename = "Location")]
    location: String,

    #[tabled(rename = "Stipend")]
    stipend: String,

    #[tabled(rename = "Deadline")]
    deadline: String,

    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        ListingRow {
            company: listing.company_name.clone(),
            position: listing.position.clone(),
            location: listing.location.clone(),
            stipend: format!("{}", listing.stipend),
            deadline: date_input(&listing.application_deadline),
            id: listing.id.to_string(),
        }
    }
}

/// Renders the listings grid.
pub fn grid(listings: &[Listing]) -> String {
    Table::new(listings.iter().map(ListingRow::from)).to_string()
}

/// Renders the detail card for a single listing.
pub fn detail(listing: &Listing) -> String {
    format!(
        "{} - {}\n  Duration:     {}\n  Stipend:      {}\n  Location:     {}\n  Deadline:     {}\n  Start date:   {}\n  Description:  {}\n  Requirements: {}\n  ID:           {}",
        listing.company_name,
        listing.position,
        listing.duration,
        listing.stipend,
        listing.location,
        date_input(&listing.application_deadline),
        date_input(&listing.start_date),
        listing.description,
        listing.requirements,
        listing.id,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{detail, grid};
    use crate::listing::Listing;

    fn listing() -> Listing {
        let now = Utc.ymd(2024, 4, 1).and_hms(12, 0, 0);

        Listing {
            id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            position: "Backend Intern".to_string(),
            duration: "3 months".to_string(),
            stipend: 5000.0,
            location: "Remote".to_string(),
            description: "Work on the API.".to_string(),
            requirements: "Rust".to_string(),
            application_deadline: Utc.ymd(2024, 5, 1).and_hms(0, 0, 0),
            start_date: Utc.ymd(2024, 6, 1).and_hms(0, 0, 0),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn the_grid_shows_every_card() {
        let listings = vec![listing(), listing()];
        let rendered = grid(&listings);

        assert_eq!(rendered.matches("Acme").count(), 2);
        assert!(rendered.contains("2024-05-01"));
    }

    #[test]
    fn the_detail_card_shows_calendar_dates() {
        let rendered = detail(&listing());

        assert!(rendered.contains("Acme - Backend Intern"));
        assert!(rendered.contains("2024-05-01"));
        assert!(rendered.contains("2024-06-01"));
        assert!(!rendered.contains("00:00:00"));
    }
}
