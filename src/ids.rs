use uuid::Uuid;

/// Source of unique identifiers for databases, tables and connections.
pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4().simple())
    }
}

/// Deterministic ids: `prefix-1`, `prefix-2`, ...
#[cfg(test)]
#[derive(Default)]
pub struct SequentialIds {
    next: u64,
}

#[cfg(test)]
impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}-{}", prefix, self.next)
    }
}
