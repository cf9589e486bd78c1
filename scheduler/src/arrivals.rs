/// Pending arrival moments, kept sorted so the earliest one sits at the end
/// of the backing vector and can be taken in O(1).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArrivalSchedule {
    // descending order, earliest last
    moments: Vec<u64>,
}

impl ArrivalSchedule {
    pub fn new() -> Self {
        ArrivalSchedule::default()
    }

    /// Inserts a moment, keeping the schedule sorted. Duplicates are kept.
    pub fn add_moment(&mut self, timestamp: u64) {
        let index = self.moments.partition_point(|&moment| moment > timestamp);
        self.moments.insert(index, timestamp);
    }

    /// Removes and returns, earliest first, every moment that falls inside
    /// `window_start..=window_end`.
    ///
    /// Stops at the first moment outside the window, so a moment earlier than
    /// `window_start` shadows everything behind it. See [`Self::discard_before`].
    pub fn pop_due(&mut self, window_start: u64, window_end: u64) -> Vec<u64> {
        let mut due = Vec::new();
        while let Some(&moment) = self.moments.last() {
            if moment < window_start || moment > window_end {
                break;
            }
            due.push(moment);
            self.moments.pop();
        }
        due
    }

    /// Drops every moment strictly earlier than `timestamp` and returns how
    /// many were dropped.
    pub fn discard_before(&mut self, timestamp: u64) -> usize {
        let keep = self.moments.partition_point(|&moment| moment >= timestamp);
        let dropped = self.moments.len() - keep;
        self.moments.truncate(keep);
        dropped
    }

    /// The earliest pending moment.
    pub fn peek(&self) -> Option<u64> {
        self.moments.last().copied()
    }

    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entropy, RandomSource};
    use pretty_assertions::assert_eq;

    #[test]
    fn drains_in_order() {
        let mut schedule = ArrivalSchedule::new();
        for moment in [40, 10, 30, 10, 20, 50] {
            schedule.add_moment(moment);
        }
        assert_eq!(schedule.peek(), Some(10));
        assert_eq!(schedule.pop_due(0, u64::MAX), vec![10, 10, 20, 30, 40, 50]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn random_insertions_drain_sorted() {
        let mut random = Entropy::seeded(3);
        let mut schedule = ArrivalSchedule::new();
        for _ in 0..500 {
            schedule.add_moment(random.uniform_u64(0, 10_000));
        }
        let drained = schedule.pop_due(0, u64::MAX);
        assert_eq!(drained.len(), 500);
        assert!(drained.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn window_is_inclusive() {
        let mut schedule = ArrivalSchedule::new();
        for moment in [100, 150, 151] {
            schedule.add_moment(moment);
        }
        assert_eq!(schedule.pop_due(100, 150), vec![100, 150]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.pop_due(100, 150), Vec::<u64>::new());
        assert_eq!(schedule.peek(), Some(151));
    }

    #[test]
    fn stale_moment_blocks_until_discarded() {
        let mut schedule = ArrivalSchedule::new();
        schedule.add_moment(5);
        schedule.add_moment(120);
        assert_eq!(schedule.pop_due(100, 150), Vec::<u64>::new());
        assert_eq!(schedule.discard_before(100), 1);
        assert_eq!(schedule.pop_due(100, 150), vec![120]);
    }

    #[test]
    fn empty_schedule_yields_nothing() {
        let mut schedule = ArrivalSchedule::new();
        assert_eq!(schedule.pop_due(0, 10), Vec::<u64>::new());
        assert_eq!(schedule.discard_before(10), 0);
        assert_eq!(schedule.peek(), None);
    }
}
