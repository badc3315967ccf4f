//! Delivery and line item records
use super::aggregate;
use super::error::{InspectionError, ValidationError};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Received,
    #[n(2)]
    Rejected,
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Received,
    #[n(2)]
    PartiallyRejected,
    #[n(3)]
    Rejected,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Received => "received",
            ItemStatus::Rejected => "rejected",
        }
    }
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Received => "received",
            DeliveryStatus::PartiallyRejected => "partially_rejected",
            DeliveryStatus::Rejected => "rejected",
        }
    }
    /// Human readable label for list views
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Not inspected",
            DeliveryStatus::Received => "Received",
            DeliveryStatus::PartiallyRejected => "Partially rejected",
            DeliveryStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "received" => Ok(ItemStatus::Received),
            "rejected" => Ok(ItemStatus::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeliveryStatus::Pending),
            "received" => Ok(DeliveryStatus::Received),
            "partially_rejected" => Ok(DeliveryStatus::PartiallyRejected),
            "rejected" => Ok(DeliveryStatus::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Calendar day a delivery arrives on.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct DeliveryDate(NaiveDate);

impl DeliveryDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DeliveryDate)
            .ok_or_else(|| ValidationError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }
    pub fn to_naive_date(&self) -> NaiveDate {
        self.0
    }
    pub fn previous_day(&self) -> Option<Self> {
        self.0.checked_sub_days(Days::new(1)).map(DeliveryDate)
    }
    pub fn next_day(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(1)).map(DeliveryDate)
    }
}

impl From<NaiveDate> for DeliveryDate {
    fn from(value: NaiveDate) -> Self {
        DeliveryDate(value)
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DeliveryDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DeliveryDate)
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))
    }
}

impl<C> minicbor::Encode<C> for DeliveryDate {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.i32(self.0.num_days_from_ce())?.ok()
    }
}

impl<'b, C> minicbor::Decode<'b, C> for DeliveryDate {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let days = d.i32()?;

        NaiveDate::from_num_days_from_ce_opt(days)
            .map(DeliveryDate)
            .ok_or(minicbor::decode::Error::message(
                "delivery date is outside the supported calendar range",
            ))
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    #[n(0)]
    id: String,
    #[n(1)]
    name: String,
    #[n(2)]
    quantity_ordered: u32,
    #[n(3)]
    quantity_received: Option<i64>, // None until inspected
    #[n(4)]
    unit: String,
    #[n(5)]
    status: ItemStatus,
    #[n(6)]
    rejection_reason: String,
}

impl LineItem {
    /// A line item that has not been inspected yet
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity_ordered: u32,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity_ordered,
            quantity_received: None,
            unit: unit.into(),
            status: ItemStatus::Pending,
            rejection_reason: String::new(),
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn quantity_ordered(&self) -> u32 {
        self.quantity_ordered
    }
    pub fn quantity_received(&self) -> Option<i64> {
        self.quantity_received
    }
    pub fn unit(&self) -> &str {
        &self.unit
    }
    pub fn status(&self) -> ItemStatus {
        self.status
    }
    pub fn rejection_reason(&self) -> &str {
        &self.rejection_reason
    }
    /// Quantity shown in an editable field: the received amount if entered, else the ordered one
    pub fn display_quantity(&self) -> i64 {
        self.quantity_received
            .unwrap_or_else(|| i64::from(self.quantity_ordered))
    }

    // Full receipt of the ordered amount
    pub(crate) fn mark_received(&mut self) {
        self.status = ItemStatus::Received;
        self.quantity_received = Some(i64::from(self.quantity_ordered));
        self.rejection_reason.clear();
    }
    pub(crate) fn mark_rejected(&mut self, reason: String) {
        self.status = ItemStatus::Rejected;
        self.quantity_received = Some(0);
        self.rejection_reason = reason;
    }
    pub(crate) fn set_quantity_received(&mut self, quantity: i64) {
        self.quantity_received = Some(quantity);
    }
    // rejected items always hold zero
    fn normalise(&mut self) {
        if self.status == ItemStatus::Rejected {
            self.quantity_received = Some(0);
        }
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    #[n(0)]
    id: String,
    #[n(1)]
    delivery_date: DeliveryDate,
    #[n(2)]
    supplier: String,
    #[n(3)]
    items: Vec<LineItem>,
    #[n(4)]
    status: DeliveryStatus, // always derived from items
}

impl Delivery {
    /// Assemble a delivery, deriving its status from the given items.
    pub fn new(
        id: impl Into<String>,
        delivery_date: DeliveryDate,
        supplier: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        let status = aggregate::aggregate_status(&items);
        Self {
            id: id.into(),
            delivery_date,
            supplier: supplier.into(),
            items,
            status,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn delivery_date(&self) -> DeliveryDate {
        self.delivery_date
    }
    pub fn supplier(&self) -> &str {
        &self.supplier
    }
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
    pub fn status(&self) -> DeliveryStatus {
        self.status
    }
    pub fn item(&self, item_id: &str) -> Result<&LineItem, InspectionError> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| self.item_not_found(item_id))
    }

    pub(crate) fn item_mut(&mut self, item_id: &str) -> Result<&mut LineItem, InspectionError> {
        match self.items.iter().position(|item| item.id == item_id) {
            Some(index) => Ok(&mut self.items[index]),
            None => Err(self.item_not_found(item_id)),
        }
    }
    pub(crate) fn refresh_status(&mut self) -> DeliveryStatus {
        self.status = aggregate::aggregate_status(&self.items);
        self.status
    }

    fn item_not_found(&self, item_id: &str) -> InspectionError {
        InspectionError::ItemNotFound {
            delivery_id: self.id.clone(),
            item_id: item_id.to_string(),
        }
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, InspectionError> {
        Ok(minicbor::to_vec(self)?)
    }
    /// Decode a delivery record. Rejected items are reset to a zero quantity,
    /// and the stored status is ignored and derived again from the items.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, InspectionError> {
        let mut delivery: Delivery = minicbor::decode(bytes)?;
        delivery.items.iter_mut().for_each(LineItem::normalise);
        delivery.refresh_status();
        Ok(delivery)
    }
    /// Hex encoded sha256 of the CBOR encoding
    pub fn digest(&self) -> Result<String, InspectionError> {
        Ok(sha256::digest(&self.to_cbor()?))
    }
}
