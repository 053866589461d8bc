pub mod contact;
pub mod form;
pub mod payload;
pub mod portfolio;
pub mod rules;
pub mod schedule;
pub mod template;
pub mod wizard;

pub use crate::domain::model::{
    BookingRequest, ContactRequest, DispatchPayload, PayloadKind, PortfolioItem, ServiceId,
};
pub use crate::domain::ports::{Clock, NotificationDispatcher, PortfolioSource};
pub use crate::utils::error::Result;
