mod models;

pub use models::Session;
pub(crate) use models::StoredSession;
