#[derive(thiserror::Error, Debug)]
pub enum InspectionError {
    #[error("Delivery {0} does not exist")]
    DeliveryNotFound(String),
    #[error("Item {item_id} does not exist on delivery {delivery_id}")]
    ItemNotFound {
        delivery_id: String,
        item_id: String,
    },
    #[error("Delivery {0} already exists")]
    DuplicateDelivery(String),
    #[error("Rejection reason must not be empty")]
    EmptyRejectionReason,
    #[error("Received quantity {0} is negative")]
    NegativeQuantity(i64),
    #[error("Item {0} is rejected, its received quantity is fixed at zero")]
    QuantityOnRejectedItem(String),
    #[error("failed to encode delivery: {0}")]
    Encode(#[from] minicbor::encode::Error<std::convert::Infallible>),
    #[error("failed to decode delivery: {0}")]
    Decode(#[from] minicbor::decode::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Delivery is missing a supplier")]
    MissingSupplier,
    #[error("Delivery is missing a delivery date")]
    MissingDate,
    #[error("Delivery must contain at least one line item")]
    NoItems,
    #[error("Line item name is empty")]
    EmptyItemName,
    #[error("Line item id {0} appears more than once")]
    DuplicateItem(String),
    #[error("{0} is not a valid calendar date")]
    InvalidDate(String),
    #[error("{0} is not a known status")]
    UnknownStatus(String),
}
