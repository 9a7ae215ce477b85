//! Session boundary: wire protocol, per-session dispatch and the registry of
//! live sessions.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::SessionRegistry;
pub use protocol::{ClientIntent, PlayerInfo, ServerEvent};
pub use session::{Delivery, EventSink, GameSession, Outbox, Recipient};
