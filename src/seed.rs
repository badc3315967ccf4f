//! Sample deliveries the application starts with
use super::delivery::{Delivery, DeliveryDate, LineItem};
use super::error::ValidationError;

// (id, name, ordered, unit)
type ItemRow = (&'static str, &'static str, u32, &'static str);

fn pending(rows: &[ItemRow]) -> Vec<LineItem> {
    rows.iter()
        .map(|&(id, name, ordered, unit)| LineItem::new(id, name, ordered, unit))
        .collect()
}

pub fn deliveries() -> Result<Vec<Delivery>, ValidationError> {
    let d003_items = {
        let mut items = pending(&[
            ("I007", "Domestic pork belly", 10, "kg"),
            ("I008", "Domestic chicken thigh", 15, "kg"),
        ]);
        items.iter_mut().for_each(LineItem::mark_received);
        items
    };

    let d004_items = {
        let mut items = pending(&[
            ("I009", "Draft beer keg", 2, "kegs"),
            ("I010", "Junmai ginjo sake", 6, "bottles"),
        ]);
        items[0].mark_received();
        items[1].mark_rejected("One bottle returned, broken in transit".to_string());
        items
    };

    Ok(vec![
        Delivery::new(
            "D001",
            DeliveryDate::from_ymd(2025, 7, 9)?,
            "Harbour Fish Market",
            pending(&[
                ("I001", "Red sea bream (farmed)", 5, "kg"),
                ("I002", "Bluefin tuna (lean)", 3, "kg"),
                ("I003", "Live abalone", 10, "pcs"),
            ]),
        ),
        Delivery::new(
            "D002",
            DeliveryDate::from_ymd(2025, 7, 9)?,
            "Green Grocers Wholesale",
            pending(&[
                ("I004", "Lettuce", 10, "heads"),
                ("I005", "Tomatoes", 5, "boxes"),
                ("I006", "Green onions", 20, "stalks"),
            ]),
        ),
        Delivery::new(
            "D003",
            DeliveryDate::from_ymd(2025, 7, 8)?,
            "Prime Meat Wholesale",
            d003_items,
        ),
        Delivery::new(
            "D004",
            DeliveryDate::from_ymd(2025, 7, 7)?,
            "Liquor Distributors",
            d004_items,
        ),
        Delivery::new(
            "D005",
            DeliveryDate::from_ymd(2025, 7, 6)?,
            "Rice Merchant",
            pending(&[
                ("I011", "Koshihikari rice", 30, "kg"),
                ("I012", "Glutinous rice", 5, "kg"),
            ]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DeliveryStatus;

    #[test]
    fn seed_statuses_match_their_items() {
        let statuses: Vec<(String, DeliveryStatus)> = deliveries()
            .unwrap()
            .iter()
            .map(|d| (d.id().to_string(), d.status()))
            .collect();

        assert_eq!(
            statuses,
            vec![
                ("D001".to_string(), DeliveryStatus::Pending),
                ("D002".to_string(), DeliveryStatus::Pending),
                ("D003".to_string(), DeliveryStatus::Received),
                ("D004".to_string(), DeliveryStatus::PartiallyRejected),
                ("D005".to_string(), DeliveryStatus::Pending),
            ]
        );
    }

    #[test]
    fn item_ids_are_unique_across_the_seed() {
        let mut ids: Vec<String> = deliveries()
            .unwrap()
            .iter()
            .flat_map(|d| d.items().iter().map(|i| i.id().to_string()).collect::<Vec<_>>())
            .collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, 12);
    }
}
