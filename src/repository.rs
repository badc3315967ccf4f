//! In-memory delivery collection
use super::delivery::Delivery;
use super::error::{InspectionError, ValidationError};
use super::filter::DeliveryFilter;
use super::seed;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The authoritative list of deliveries, in display order.
///
/// Readers always get owned clones. `replace` swaps a whole record under the
/// write lock, so a reader sees either the old delivery or the new one.
#[derive(Debug, Default)]
pub struct DeliveryRepository {
    deliveries: RwLock<Vec<Delivery>>,
}

impl DeliveryRepository {
    pub fn new(deliveries: Vec<Delivery>) -> Self {
        Self {
            deliveries: RwLock::new(deliveries),
        }
    }

    /// A repository holding the built-in sample deliveries
    pub fn seeded() -> Result<Self, ValidationError> {
        Ok(Self::new(seed::deliveries()?))
    }

    // every write is a single push or assignment, so a poisoned lock still holds whole records
    fn read(&self) -> RwLockReadGuard<'_, Vec<Delivery>> {
        self.deliveries.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> RwLockWriteGuard<'_, Vec<Delivery>> {
        self.deliveries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
    pub fn list(&self) -> Vec<Delivery> {
        self.read().clone()
    }
    pub fn get(&self, delivery_id: &str) -> Result<Delivery, InspectionError> {
        self.read()
            .iter()
            .find(|delivery| delivery.id() == delivery_id)
            .cloned()
            .ok_or_else(|| InspectionError::DeliveryNotFound(delivery_id.to_string()))
    }
    pub fn search(&self, filter: &DeliveryFilter) -> Vec<Delivery> {
        self.read()
            .iter()
            .filter(|delivery| filter.matches(delivery))
            .cloned()
            .collect()
    }

    /// Append a new delivery. Ids must be unique.
    pub fn insert(&self, delivery: Delivery) -> Result<(), InspectionError> {
        let mut deliveries = self.write();
        if deliveries.iter().any(|d| d.id() == delivery.id()) {
            return Err(InspectionError::DuplicateDelivery(delivery.id().to_string()));
        }
        deliveries.push(delivery);
        Ok(())
    }

    /// Swap the stored delivery with the same id for `delivery`, returning the old record.
    pub fn replace(&self, delivery: Delivery) -> Result<Delivery, InspectionError> {
        let mut deliveries = self.write();
        match deliveries.iter_mut().find(|d| d.id() == delivery.id()) {
            Some(slot) => Ok(std::mem::replace(slot, delivery)),
            None => Err(InspectionError::DeliveryNotFound(delivery.id().to_string())),
        }
    }
}
