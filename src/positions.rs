//! Dense 1-based ordering of tasks within a list.
//!
//! A list with `N` tasks occupies positions `1..=N` after every create or
//! move. Deletes leave gaps behind; nothing here renumbers on delete.
//!
//! Moving a task from `from` to `to` only touches the closed interval between
//! the two positions: the moved task lands on `to` directly and every other
//! task inside the interval slides one slot toward `from`.

use std::ops::RangeInclusive;

/// First position in any list.
pub const FIRST_POSITION: i32 = 1;

/// Position a newly created task takes, given the current maximum in its list.
pub fn next_position(max_position: Option<i32>) -> i32 {
    max_position.unwrap_or(FIRST_POSITION - 1) + 1
}

/// Whether `target` addresses an occupied slot of a list whose largest
/// position is `max_position`.
pub fn target_in_range(target: i32, max_position: Option<i32>) -> bool {
    match max_position {
        Some(max) => (FIRST_POSITION..=max).contains(&target),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher positions; the tasks in between shift down by one.
    Forward,
    /// Toward lower positions; the tasks in between shift up by one.
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    from: i32,
    to: i32,
}

impl MovePlan {
    /// `None` when the task already sits at `to`.
    pub fn new(from: i32, to: i32) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn direction(&self) -> Direction {
        if self.to > self.from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Offset applied to every task inside the affected interval.
    pub fn shift(&self) -> i32 {
        match self.direction() {
            Direction::Forward => -1,
            Direction::Backward => 1,
        }
    }

    /// Positions of the tasks that slide, excluding the moved task.
    pub fn shifted_range(&self) -> RangeInclusive<i32> {
        match self.direction() {
            Direction::Forward => (self.from + 1)..=self.to,
            Direction::Backward => self.to..=(self.from - 1),
        }
    }

    /// Rows a move rewrites in a dense list: the moved task plus every
    /// shifted one.
    pub fn span(&self) -> u64 {
        u64::from(self.from.abs_diff(self.to)) + 1
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn dense(n: i32) -> Vec<i32> {
        (1..=n).collect()
    }

    /// Where the task at `position` lands when `plan` is applied, mirroring
    /// the rows the move statement rewrites.
    fn remap(plan: &MovePlan, position: i32) -> i32 {
        if position == plan.from() {
            plan.to()
        } else if plan.shifted_range().contains(&position) {
            position + plan.shift()
        } else {
            position
        }
    }

    #[test]
    fn appends_after_the_current_maximum() {
        assert_eq!(next_position(None), 1);
        assert_eq!(next_position(Some(1)), 2);
        assert_eq!(next_position(Some(7)), 8);
    }

    #[test]
    fn same_position_is_not_a_move() {
        assert_eq!(MovePlan::new(3, 3), None);
    }

    #[test]
    fn forward_move_shifts_the_following_tasks_down() {
        let plan = MovePlan::new(2, 5).expect("positions differ");
        assert_eq!(plan.direction(), Direction::Forward);
        assert_eq!(plan.shift(), -1);
        assert_eq!(plan.shifted_range(), 3..=5);
        assert_eq!(plan.span(), 4);

        let moved: Vec<i32> = dense(6).into_iter().map(|p| remap(&plan, p)).collect();
        assert_eq!(moved, vec![1, 5, 2, 3, 4, 6]);
    }

    #[test]
    fn backward_move_shifts_the_preceding_tasks_up() {
        let plan = MovePlan::new(6, 1).expect("positions differ");
        assert_eq!(plan.direction(), Direction::Backward);
        assert_eq!(plan.shift(), 1);
        assert_eq!(plan.shifted_range(), 1..=5);
        assert_eq!(plan.span(), 6);

        let moved: Vec<i32> = dense(6).into_iter().map(|p| remap(&plan, p)).collect();
        assert_eq!(moved, vec![2, 3, 4, 5, 6, 1]);
    }

    #[test]
    fn targets_outside_the_list_are_rejected() {
        assert!(!target_in_range(0, Some(6)));
        assert!(!target_in_range(7, Some(6)));
        assert!(!target_in_range(-1, Some(6)));
        assert!(!target_in_range(1, None));
        assert!(target_in_range(1, Some(6)));
        assert!(target_in_range(6, Some(6)));
    }

    proptest! {
        #[test]
        fn moves_keep_positions_dense(n in 1i32..40, picks in proptest::collection::vec((0usize..40, 0usize..40), 0..20)) {
            let mut positions = dense(n);
            for (task, target) in picks {
                let task = task % positions.len();
                let target = (target as i32 % n) + 1;
                if let Some(plan) = MovePlan::new(positions[task], target) {
                    positions = positions.iter().map(|p| remap(&plan, *p)).collect();
                }
                let mut sorted = positions.clone();
                sorted.sort_unstable();
                prop_assert_eq!(sorted, dense(n));
            }
        }

        #[test]
        fn moves_touch_exactly_the_span(n in 1i32..40, from in 1i32..40, to in 1i32..40) {
            let from = (from - 1) % n + 1;
            let to = (to - 1) % n + 1;
            match MovePlan::new(from, to) {
                None => prop_assert_eq!(from, to),
                Some(plan) => {
                    let touched = dense(n).into_iter().filter(|p| remap(&plan, *p) != *p).count();
                    prop_assert_eq!(touched as u64, plan.span());
                }
            }
        }
    }
}
