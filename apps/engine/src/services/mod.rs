pub mod events;
pub mod game_flow;

pub use events::{EventBus, EventEnvelope, GameEvent};
pub use game_flow::{ActionKind, CreatedSession, GameEngine, JoinedSeat, PendingAction};
