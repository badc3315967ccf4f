//! Drafts for importing new deliveries
use super::delivery::{Delivery, DeliveryDate, LineItem};
use super::error::ValidationError;
use super::utils::{self, DELIVERY_HRP, ITEM_HRP};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    id: Option<String>, // generated on finalise when unset
    name: String,
    quantity_ordered: u32,
    unit: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, quantity_ordered: u32, unit: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity_ordered,
            unit: unit.into(),
        }
    }
    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Builder for a delivery arriving from outside. Everything starts out pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDraft {
    id: Option<String>,
    supplier: Option<String>,
    delivery_date: Option<DeliveryDate>,
    items: Vec<ItemDraft>,
}

impl DeliveryDraft {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
    pub fn set_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }
    pub fn set_delivery_date(mut self, date: DeliveryDate) -> Self {
        self.delivery_date = Some(date);
        self
    }
    pub fn add_item(mut self, item: ItemDraft) -> Self {
        self.items.push(item);
        self
    }

    // Checks fields, fills in missing ids and returns a pending delivery
    pub fn validate_and_finalise(&self) -> anyhow::Result<Delivery> {
        let supplier = match self.supplier.as_deref().map(str::trim) {
            Some(supplier) if !supplier.is_empty() => supplier,
            _ => return Err(ValidationError::MissingSupplier.into()),
        };
        let Some(delivery_date) = self.delivery_date else {
            return Err(ValidationError::MissingDate.into());
        };
        if self.items.is_empty() {
            return Err(ValidationError::NoItems.into());
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for draft in &self.items {
            if draft.name.trim().is_empty() {
                return Err(ValidationError::EmptyItemName.into());
            }
            let id = match &draft.id {
                Some(id) => id.clone(),
                None => utils::new_record_id(ITEM_HRP)?,
            };
            if !seen.insert(id.clone()) {
                return Err(ValidationError::DuplicateItem(id).into());
            }
            items.push(LineItem::new(
                id,
                draft.name.clone(),
                draft.quantity_ordered,
                draft.unit.clone(),
            ));
        }

        let id = match &self.id {
            Some(id) => id.clone(),
            None => utils::new_record_id(DELIVERY_HRP)?,
        };

        Ok(Delivery::new(id, delivery_date, supplier, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{DeliveryStatus, ItemStatus};

    fn date() -> DeliveryDate {
        DeliveryDate::from_ymd(2025, 7, 10).unwrap()
    }

    fn complete_draft() -> DeliveryDraft {
        DeliveryDraft::new()
            .set_supplier("Rice Merchant")
            .set_delivery_date(date())
            .add_item(ItemDraft::new("Koshihikari rice", 30, "kg"))
            .add_item(ItemDraft::new("Glutinous rice", 5, "kg").set_id("I900"))
    }

    fn validation_error(draft: &DeliveryDraft) -> ValidationError {
        draft
            .validate_and_finalise()
            .unwrap_err()
            .downcast::<ValidationError>()
            .unwrap()
    }

    #[test]
    fn finalised_draft_is_pending() {
        let delivery = complete_draft().validate_and_finalise().unwrap();

        assert!(delivery.id().starts_with("delivery_1"));
        assert_eq!(delivery.status(), DeliveryStatus::Pending);
        assert_eq!(delivery.supplier(), "Rice Merchant");
        assert_eq!(delivery.items().len(), 2);
        assert!(delivery.items()[0].id().starts_with("item_1"));
        assert_eq!(delivery.items()[1].id(), "I900");
        assert!(
            delivery
                .items()
                .iter()
                .all(|i| i.status() == ItemStatus::Pending && i.quantity_received().is_none())
        );
    }

    #[test]
    fn explicit_delivery_id_is_kept() {
        let delivery = complete_draft().set_id("D900").validate_and_finalise().unwrap();
        assert_eq!(delivery.id(), "D900");
    }

    #[test]
    fn missing_fields_are_reported() {
        assert_eq!(
            validation_error(&DeliveryDraft::new().set_delivery_date(date())),
            ValidationError::MissingSupplier
        );
        assert_eq!(
            validation_error(&DeliveryDraft::new().set_supplier("  ")),
            ValidationError::MissingSupplier
        );
        assert_eq!(
            validation_error(&DeliveryDraft::new().set_supplier("Rice Merchant")),
            ValidationError::MissingDate
        );
        assert_eq!(
            validation_error(
                &DeliveryDraft::new()
                    .set_supplier("Rice Merchant")
                    .set_delivery_date(date())
            ),
            ValidationError::NoItems
        );
    }

    #[test]
    fn item_problems_are_reported() {
        let blank_name = complete_draft().add_item(ItemDraft::new(" ", 1, "kg"));
        assert_eq!(validation_error(&blank_name), ValidationError::EmptyItemName);

        let duplicate = complete_draft().add_item(ItemDraft::new("More rice", 1, "kg").set_id("I900"));
        assert_eq!(
            validation_error(&duplicate),
            ValidationError::DuplicateItem("I900".into())
        );
    }
}
