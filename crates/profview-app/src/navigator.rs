// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::num::NonZeroUsize;
use tracing::{debug, warn};

use crate::{JumpTarget, ProfileError};

/// Cursor over `len` records. The index never leaves `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    len: NonZeroUsize,
}

impl Navigator {
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { current: 0, len }
    }

    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub const fn len(&self) -> usize {
        self.len.get()
    }

    pub const fn is_first(&self) -> bool {
        self.current == 0
    }

    pub const fn is_last(&self) -> bool {
        self.current + 1 == self.len.get()
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        debug!(index = self.current, "cursor next");
        true
    }

    /// Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        debug!(index = self.current, "cursor prev");
        true
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), ProfileError> {
        if index >= self.len.get() {
            let error = ProfileError::IndexOutOfRange {
                target: JumpTarget::Index(index),
                len: self.len.get(),
            };
            warn!(%error, current = self.current, "rejected jump");
            return Err(error);
        }
        self.current = index;
        debug!(index, "cursor jump");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Navigator;
    use crate::{JumpTarget, ProfileError};
    use std::num::NonZeroUsize;

    fn navigator(len: usize) -> Navigator {
        Navigator::new(NonZeroUsize::new(len).expect("non-zero len"))
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(navigator(3).current_index(), 0);
    }

    #[test]
    fn next_and_prev_saturate_at_bounds() {
        let mut nav = navigator(2);
        assert!(!nav.prev());
        assert_eq!(nav.current_index(), 0);

        assert!(nav.next());
        assert_eq!(nav.current_index(), 1);
        assert!(!nav.next());
        assert_eq!(nav.current_index(), 1);

        assert!(nav.prev());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn single_record_never_moves() {
        let mut nav = navigator(1);
        assert!(!nav.next());
        assert!(!nav.prev());
        assert!(nav.is_first() && nav.is_last());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn any_step_sequence_stays_in_bounds() {
        // Deterministic pseudo-random walk across several sizes.
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for len in 1..=7 {
            let mut nav = navigator(len);
            for _ in 0..500 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                if seed % 2 == 0 {
                    nav.next();
                } else {
                    nav.prev();
                }
                assert!(nav.current_index() < len, "len {len}");
            }
        }
    }

    #[test]
    fn jump_out_of_range_leaves_cursor_unchanged() {
        let mut nav = navigator(2);
        nav.next();

        let error = nav.jump_to(5).expect_err("out of range jump should fail");
        assert_eq!(
            error,
            ProfileError::IndexOutOfRange {
                target: JumpTarget::Index(5),
                len: 2,
            }
        );
        assert_eq!(nav.current_index(), 1);

        assert!(nav.jump_to(2).is_err());
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn jump_in_range_moves_cursor() -> Result<(), ProfileError> {
        let mut nav = navigator(4);
        nav.jump_to(3)?;
        assert_eq!(nav.current_index(), 3);
        nav.jump_to(0)?;
        assert_eq!(nav.current_index(), 0);
        Ok(())
    }

    #[test]
    fn transitions_are_deterministic() {
        let mut left = navigator(5);
        let mut right = navigator(5);
        for _ in 0..3 {
            left.next();
            right.next();
        }
        left.prev();
        right.prev();
        assert_eq!(left, right);
    }
}
