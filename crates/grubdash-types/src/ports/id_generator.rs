use uuid::Uuid;

/// Issues record identifiers. Every call returns an id not handed out before
/// in this process; callers treat the format as opaque.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
