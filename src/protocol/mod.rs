//! Protocol orchestration: the operation surface and emitted events.

pub mod coordinator;
pub mod events;

pub use coordinator::{ClaimProtocol, ProtocolStatistics};
pub use events::{EventLog, ProtocolEvent};
