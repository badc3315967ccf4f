//! Editable inspection sessions over a single delivery
use super::config::ValidationPolicy;
use super::delivery::{Delivery, DeliveryStatus, ItemStatus, LineItem};
use super::error::InspectionError;
use super::repository::DeliveryRepository;
use super::utils;

/// An open inspection of one delivery.
///
/// The session owns a private copy of the delivery, so nothing done here is
/// visible in the repository until the session is finalized and committed.
/// Finalizing or abandoning consumes the session.
#[derive(Debug, Clone)]
pub struct InspectionSession {
    delivery: Delivery,
    base_digest: String, // digest of the delivery as it was opened
    policy: ValidationPolicy,
}

/// The item an inspector has chosen to reject, awaiting a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionRequest {
    pub delivery_id: String,
    pub item_id: String,
    pub item_name: String,
}

/// Outcome of a finalized session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedInspection {
    pub delivery: Delivery,
    pub status: DeliveryStatus,
}

impl RejectionRequest {
    pub fn prompt(&self) -> String {
        format!("Reason for rejecting \"{}\"", self.item_name)
    }
}

impl InspectionSession {
    pub fn open(
        repository: &DeliveryRepository,
        delivery_id: &str,
    ) -> Result<Self, InspectionError> {
        Self::open_with(repository, delivery_id, ValidationPolicy::default())
    }

    pub fn open_with(
        repository: &DeliveryRepository,
        delivery_id: &str,
        policy: ValidationPolicy,
    ) -> Result<Self, InspectionError> {
        // the repository hands out an owned clone
        let delivery = repository.get(delivery_id)?;
        Self::from_delivery(delivery, policy)
    }

    /// Start a session over a delivery the caller already holds.
    pub fn from_delivery(
        delivery: Delivery,
        policy: ValidationPolicy,
    ) -> Result<Self, InspectionError> {
        let base_digest = delivery.digest()?;
        Ok(Self {
            delivery,
            base_digest,
            policy,
        })
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }
    pub fn delivery_id(&self) -> &str {
        self.delivery.id()
    }
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }
    pub fn item(&self, item_id: &str) -> Result<&LineItem, InspectionError> {
        self.delivery.item(item_id)
    }

    /// Whether the working copy differs from the delivery as opened
    pub fn is_modified(&self) -> Result<bool, InspectionError> {
        Ok(self.delivery.digest()? != self.base_digest)
    }

    /// Accept the full ordered quantity of an item.
    pub fn receive_item(&mut self, item_id: &str) -> Result<&LineItem, InspectionError> {
        let item = self.delivery.item_mut(item_id)?;
        item.mark_received();
        tracing::debug!(delivery_id = %self.delivery.id(), item_id, "item received");
        self.delivery.item(item_id)
    }

    /// Select an item for rejection. Nothing changes until the reason is confirmed.
    pub fn initiate_reject(&self, item_id: &str) -> Result<RejectionRequest, InspectionError> {
        let item = self.delivery.item(item_id)?;
        Ok(RejectionRequest {
            delivery_id: self.delivery.id().to_string(),
            item_id: item.id().to_string(),
            item_name: item.name().to_string(),
        })
    }

    pub fn confirm_reject(
        &mut self,
        item_id: &str,
        reason: impl Into<String>,
    ) -> Result<&LineItem, InspectionError> {
        let reason = reason.into();
        if self.policy.is_strict() && reason.trim().is_empty() {
            return Err(InspectionError::EmptyRejectionReason);
        }

        let item = self.delivery.item_mut(item_id)?;
        item.mark_rejected(reason);
        tracing::debug!(delivery_id = %self.delivery.id(), item_id, "item rejected");
        self.delivery.item(item_id)
    }

    /// Record the quantity typed by the inspector. Unreadable text counts as 0.
    ///
    /// A rejected item keeps its zero quantity: the edit is ignored under
    /// `Permissive` and refused under `Strict`.
    pub fn set_received_quantity(
        &mut self,
        item_id: &str,
        raw_value: &str,
    ) -> Result<&LineItem, InspectionError> {
        let quantity = utils::parse_quantity(raw_value);
        let strict = self.policy.is_strict();

        let item = self.delivery.item_mut(item_id)?;
        if strict && quantity < 0 {
            return Err(InspectionError::NegativeQuantity(quantity));
        }
        if item.status() == ItemStatus::Rejected {
            if strict {
                return Err(InspectionError::QuantityOnRejectedItem(item_id.to_string()));
            }
            tracing::debug!(
                delivery_id = %self.delivery.id(),
                item_id,
                raw_value,
                "quantity edit on rejected item ignored"
            );
            return self.delivery.item(item_id);
        }
        item.set_quantity_received(quantity);
        tracing::debug!(
            delivery_id = %self.delivery.id(),
            item_id,
            raw_value,
            quantity,
            "received quantity set"
        );
        self.delivery.item(item_id)
    }

    /// Close the session, deriving the delivery's status from its items.
    pub fn finalize(self) -> FinalizedInspection {
        let mut delivery = self.delivery;
        let status = delivery.refresh_status();
        FinalizedInspection { delivery, status }
    }

    /// Close the session and throw the working copy away.
    pub fn abandon(self) {
        tracing::debug!(delivery_id = %self.delivery.id(), "session abandoned");
    }
}
