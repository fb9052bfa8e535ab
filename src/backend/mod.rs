pub mod actor;
pub mod messages;
pub mod state;

pub use actor::BackendActor;
pub use messages::{BackendCommand, BackendEvent};
pub use state::{PlannedDownload, Session, SessionState};
