use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::BlockType;

/// Millisecond time source for block ids
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }

    pub fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Generates `"{type}-{millis}"` block ids
///
/// Within a single millisecond, or when a candidate is already taken, a
/// `-{n}` suffix is appended with `n` strictly increasing.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
    last_millis: i64,
    seq: u32,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_millis: i64::MIN,
            seq: 0,
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Next id for `block_type` that `is_taken` does not reject
    pub fn new_id(&mut self, block_type: BlockType, is_taken: impl Fn(&str) -> bool) -> String {
        let now = self.clock.now_millis();
        if now == self.last_millis {
            self.seq += 1;
        } else {
            self.last_millis = now;
            self.seq = 0;
        }

        loop {
            let candidate = if self.seq == 0 {
                format!("{}-{}", block_type, now)
            } else {
                format!("{}-{}-{}", block_type, now, self.seq)
            };

            if !is_taken(&candidate) {
                return candidate;
            }
            self.seq += 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_gets_suffix() {
        let mut gen = IdGenerator::new(Arc::new(FixedClock::new(1_700_000_000_000)));

        let id1 = gen.new_id(BlockType::Paragraph, |_| false);
        let id2 = gen.new_id(BlockType::Paragraph, |_| false);
        let id3 = gen.new_id(BlockType::Paragraph, |_| false);

        assert_eq!(id1, "paragraph-1700000000000");
        assert_eq!(id2, "paragraph-1700000000000-1");
        assert_eq!(id3, "paragraph-1700000000000-2");
    }

    #[test]
    fn test_suffix_resets_when_clock_moves() {
        let clock = Arc::new(FixedClock::new(5));
        let mut gen = IdGenerator::new(clock.clone());

        gen.new_id(BlockType::Button, |_| false);
        gen.new_id(BlockType::Button, |_| false);
        clock.set(6);

        assert_eq!(gen.new_id(BlockType::Button, |_| false), "button-6");
    }

    #[test]
    fn test_taken_ids_are_skipped() {
        let mut gen = IdGenerator::new(Arc::new(FixedClock::new(9)));

        let id = gen.new_id(BlockType::Heading, |c| c == "heading-9" || c == "heading-9-1");
        assert_eq!(id, "heading-9-2");
    }
}
