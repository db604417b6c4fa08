//! Id assignment for new entities.
//!
//! Users, events and tickets draw from one id space. A candidate is accepted
//! only when no live entity of any kind carries it.

use configs::IdStrategy;
use rand::Rng;

#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: i64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self { Self { strategy, next: 1 } }

    pub fn strategy(&self) -> IdStrategy { self.strategy }

    /// Move the sequential counter past `max_id` (ids seen at load time).
    pub fn seed(&mut self, max_id: i64) {
        if max_id >= self.next {
            self.next = max_id.checked_add(1).unwrap_or(1);
        }
    }

    /// Produce a positive id for which `is_taken` is false.
    pub fn next_id(&mut self, is_taken: impl Fn(i64) -> bool) -> i64 {
        match self.strategy {
            IdStrategy::Random => {
                let mut rng = rand::thread_rng();
                loop {
                    let candidate = rng.gen_range(1..=i64::MAX);
                    if !is_taken(candidate) {
                        return candidate;
                    }
                }
            }
            IdStrategy::Sequential => loop {
                let candidate = self.next;
                self.next = candidate.checked_add(1).unwrap_or(1);
                if candidate > 0 && !is_taken(candidate) {
                    return candidate;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_skips_taken_ids() {
        let taken: HashSet<i64> = [1, 2, 4].into_iter().collect();
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        assert_eq!(ids.next_id(|id| taken.contains(&id)), 3);
        assert_eq!(ids.next_id(|id| taken.contains(&id)), 5);
    }

    #[test]
    fn seed_moves_counter_forward_only() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        ids.seed(41);
        ids.seed(7);
        assert_eq!(ids.next_id(|_| false), 42);
    }

    #[test]
    fn sequential_wraps_to_positive() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        ids.seed(i64::MAX - 1);
        assert_eq!(ids.next_id(|_| false), i64::MAX);
        assert_eq!(ids.next_id(|_| false), 1);
    }

    #[test]
    fn random_ids_are_positive_and_free() {
        let mut ids = IdGenerator::new(IdStrategy::Random);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = ids.next_id(|id| seen.contains(&id));
            assert!(id > 0);
            assert!(seen.insert(id));
        }
    }
}
