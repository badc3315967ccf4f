pub mod aggregate;
pub mod config;
pub mod delivery;
pub mod draft;
pub mod error;
pub mod filter;
pub mod gate;
pub mod repository;
pub mod seed;
pub mod service;
pub mod session;
pub mod utils;

pub use delivery::{Delivery, DeliveryDate, DeliveryStatus, ItemStatus, LineItem};
pub use error::{InspectionError, ValidationError};
pub use session::{FinalizedInspection, InspectionSession, RejectionRequest};
