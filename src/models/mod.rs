//! Data types shared by the API client, the transport and the thread core.

mod contact;
mod message;
mod user;

pub use contact::{Contact, ContactsResponse, ProfileRecord};
pub use message::{DeliveryState, HistoryResponse, Message, Origin, OutgoingMessage, WireMessage};
pub use user::{SessionUser, SignupForm, DEFAULT_AVATAR_URL};
