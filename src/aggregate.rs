//! Derivation of a delivery's status from its line items
//!
//! The rules are evaluated top to bottom and the first match wins. "Every
//! item rejected" must come before "some item rejected", otherwise a fully
//! rejected delivery would read as partially rejected.
use super::delivery::{DeliveryStatus, ItemStatus, LineItem};

/// Counts of item outcomes within one delivery.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusTally {
    pub total: usize,
    pub pending: usize,
    pub received: usize,
    pub rejected: usize,
}

type Rule = (fn(&StatusTally) -> bool, DeliveryStatus);

const RULES: [Rule; 4] = [
    (StatusTally::all_received, DeliveryStatus::Received),
    (StatusTally::all_rejected, DeliveryStatus::Rejected),
    (StatusTally::any_rejected, DeliveryStatus::PartiallyRejected),
    (StatusTally::otherwise, DeliveryStatus::Pending),
];

impl StatusTally {
    pub fn from_statuses<I: IntoIterator<Item = ItemStatus>>(statuses: I) -> Self {
        statuses
            .into_iter()
            .fold(StatusTally::default(), |mut tally, status| {
                tally.total += 1;
                match status {
                    ItemStatus::Pending => tally.pending += 1,
                    ItemStatus::Received => tally.received += 1,
                    ItemStatus::Rejected => tally.rejected += 1,
                }
                tally
            })
    }

    // vacuously true for an empty delivery
    fn all_received(&self) -> bool {
        self.received == self.total
    }
    fn all_rejected(&self) -> bool {
        self.rejected == self.total
    }
    fn any_rejected(&self) -> bool {
        self.rejected > 0
    }
    fn otherwise(&self) -> bool {
        true
    }

    pub fn status(&self) -> DeliveryStatus {
        RULES
            .iter()
            .find(|(applies, _)| applies(self))
            .map(|(_, status)| *status)
            .unwrap_or(DeliveryStatus::Pending)
    }
}

/// Aggregate status of a sequence of item outcomes
pub fn aggregate<I: IntoIterator<Item = ItemStatus>>(statuses: I) -> DeliveryStatus {
    StatusTally::from_statuses(statuses).status()
}

pub fn aggregate_status(items: &[LineItem]) -> DeliveryStatus {
    aggregate(items.iter().map(LineItem::status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ItemStatus::*;

    #[test]
    fn all_received_is_received() {
        assert_eq!(aggregate([Received, Received]), DeliveryStatus::Received);
    }

    #[test]
    fn all_rejected_wins_over_partial() {
        assert_eq!(aggregate([Rejected, Rejected]), DeliveryStatus::Rejected);
        assert_eq!(aggregate([Rejected]), DeliveryStatus::Rejected);
    }

    #[test]
    fn any_rejected_is_partial() {
        assert_eq!(
            aggregate([Received, Rejected]),
            DeliveryStatus::PartiallyRejected
        );
        assert_eq!(
            aggregate([Pending, Rejected]),
            DeliveryStatus::PartiallyRejected
        );
    }

    #[test]
    fn received_and_pending_stays_pending() {
        assert_eq!(aggregate([Received, Pending]), DeliveryStatus::Pending);
        assert_eq!(aggregate([Pending]), DeliveryStatus::Pending);
    }

    #[test]
    fn empty_delivery_is_received() {
        assert_eq!(aggregate(Vec::<ItemStatus>::new()), DeliveryStatus::Received);
    }

    #[test]
    fn tally_counts_each_outcome() {
        let tally = StatusTally::from_statuses([Pending, Received, Rejected, Rejected]);
        assert_eq!(
            tally,
            StatusTally {
                total: 4,
                pending: 1,
                received: 1,
                rejected: 2,
            }
        );
    }
}
