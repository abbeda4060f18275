//! Build subjects and the session that mutates them

pub mod persistence;
pub mod session;
pub mod subject;

pub use persistence::{from_snapshot_json, to_snapshot_json, InMemoryGateway, PersistenceGateway};
pub use session::BuildSession;
pub use subject::{BuildSubject, SubjectKind};
