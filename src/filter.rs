//! Delivery list search and day navigation
use super::delivery::{Delivery, DeliveryDate};
use chrono::Utc;

/// Narrows the delivery list by free text and delivery day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryFilter {
    search: String,
    date: Option<DeliveryDate>, // None shows every day
}

impl DeliveryFilter {
    pub fn new() -> Self {
        Self::default()
    }
    /// The list view opens on today's deliveries.
    pub fn for_today() -> Self {
        Self::new().on_date(Utc::now().date_naive().into())
    }
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }
    pub fn on_date(mut self, date: DeliveryDate) -> Self {
        self.date = Some(date);
        self
    }
    pub fn any_date(mut self) -> Self {
        self.date = None;
        self
    }
    pub fn search(&self) -> &str {
        &self.search
    }
    pub fn date(&self) -> Option<DeliveryDate> {
        self.date
    }

    // Stepping off either end of the calendar leaves the date unchanged
    pub fn previous_day(mut self) -> Self {
        self.date = self.date.map(|d| d.previous_day().unwrap_or(d));
        self
    }
    pub fn next_day(mut self) -> Self {
        self.date = self.date.map(|d| d.next_day().unwrap_or(d));
        self
    }

    /// Case-insensitive substring match on supplier or id, plus an exact day match
    pub fn matches(&self, delivery: &Delivery) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = delivery.supplier().to_lowercase().contains(&term)
            || delivery.id().to_lowercase().contains(&term);
        let matches_date = self
            .date
            .is_none_or(|date| delivery.delivery_date() == date);

        matches_search && matches_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DeliveryDate {
        DeliveryDate::from_ymd(2025, 7, d).unwrap()
    }

    fn delivery(id: &str, supplier: &str, date: DeliveryDate) -> Delivery {
        Delivery::new(id, date, supplier, vec![])
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = DeliveryFilter::new();
        assert!(filter.matches(&delivery("D001", "Harbour Fish Market", day(9))));
    }

    #[test]
    fn search_is_case_insensitive_on_supplier_and_id() {
        let d = delivery("D001", "Harbour Fish Market", day(9));
        assert!(DeliveryFilter::new().with_search("fish").matches(&d));
        assert!(DeliveryFilter::new().with_search("d00").matches(&d));
        assert!(!DeliveryFilter::new().with_search("rice").matches(&d));
    }

    #[test]
    fn date_must_match_exactly() {
        let d = delivery("D001", "Harbour Fish Market", day(9));
        assert!(DeliveryFilter::new().on_date(day(9)).matches(&d));
        assert!(!DeliveryFilter::new().on_date(day(8)).matches(&d));
        assert!(DeliveryFilter::new().on_date(day(8)).any_date().matches(&d));
    }

    #[test]
    fn day_navigation_moves_the_date() {
        let filter = DeliveryFilter::new().on_date(day(9));
        assert_eq!(filter.clone().previous_day().date(), Some(day(8)));
        assert_eq!(filter.next_day().date(), Some(day(10)));
        assert_eq!(
            DeliveryFilter::new().on_date(day(31)).next_day().date(),
            Some(DeliveryDate::from_ymd(2025, 8, 1).unwrap())
        );
        // nothing to move without a date
        assert_eq!(DeliveryFilter::new().next_day().date(), None);
    }

    #[test]
    fn today_filter_has_a_date() {
        assert!(DeliveryFilter::for_today().date().is_some());
    }
}
