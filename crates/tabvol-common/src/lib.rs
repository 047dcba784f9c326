pub mod bus;
pub mod errors;
pub mod messages;

pub use bus::{RuntimeBus, Transport};
pub use errors::TransportError;
pub use messages::{Message, TabId};

pub type Result<T> = std::result::Result<T, TransportError>;
