//! Service layer API for inspection workflow operations
use super::config::{InspectionConfig, ValidationPolicy};
use super::delivery::Delivery;
use super::draft::DeliveryDraft;
use super::error::InspectionError;
use super::filter::DeliveryFilter;
use super::repository::DeliveryRepository;
use super::session::{FinalizedInspection, InspectionSession};
use std::sync::Arc;

pub struct InspectionService {
    repository: Arc<DeliveryRepository>,
    policy: ValidationPolicy,
}

impl InspectionService {
    pub fn new(repository: Arc<DeliveryRepository>) -> Self {
        Self {
            repository,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_config(repository: Arc<DeliveryRepository>, config: &InspectionConfig) -> Self {
        Self {
            repository,
            policy: config.validation,
        }
    }

    pub fn repository(&self) -> &Arc<DeliveryRepository> {
        &self.repository
    }
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Deliveries matching `filter`, in display order
    pub fn deliveries(&self, filter: &DeliveryFilter) -> Vec<Delivery> {
        self.repository.search(filter)
    }

    /// Open an editable copy of a stored delivery
    pub fn open_session(&self, delivery_id: &str) -> Result<InspectionSession, InspectionError> {
        let session = InspectionSession::open_with(&self.repository, delivery_id, self.policy)?;
        tracing::debug!(delivery_id, policy = ?self.policy, "inspection session opened");
        Ok(session)
    }

    /// Finalize the session and store the result in place of the original delivery
    pub fn finalize(
        &self,
        session: InspectionSession,
    ) -> Result<FinalizedInspection, InspectionError> {
        let finalized = session.finalize();

        // Whole record swap, nothing is merged
        let previous = self.repository.replace(finalized.delivery.clone())?;

        tracing::info!(
            delivery_id = %finalized.delivery.id(),
            from = %previous.status(),
            to = %finalized.status,
            "inspection finalized"
        );
        Ok(finalized)
    }

    /// Drop the session without touching the repository
    pub fn abandon(&self, session: InspectionSession) {
        match session.is_modified() {
            Ok(true) => {
                tracing::warn!(delivery_id = %session.delivery_id(), "discarding unsaved inspection edits")
            }
            Ok(false) => {}
            Err(err) => tracing::warn!(error = %err, "could not compare session with its original"),
        }
        session.abandon();
    }

    /// Validate a draft and add the resulting pending delivery
    pub fn import(&self, draft: &DeliveryDraft) -> anyhow::Result<Delivery> {
        let delivery = draft.validate_and_finalise()?;
        self.repository.insert(delivery.clone())?;

        tracing::info!(
            delivery_id = %delivery.id(),
            supplier = %delivery.supplier(),
            items = delivery.items().len(),
            "delivery imported"
        );
        Ok(delivery)
    }
}
