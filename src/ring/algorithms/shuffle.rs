use crate::ring::{move_node, next_of, Ring};

/// A source of uniformly distributed indices, used by [`Ring::shuffle`].
///
/// With the `rand` feature (enabled by default), every [`rand::Rng`]
/// implements it.
pub trait Uniform {
    /// Returns an index uniformly drawn from `0..n`. `n` is always positive.
    fn uniform(&mut self, n: usize) -> usize;
}

#[cfg(feature = "rand")]
impl<R: rand::Rng + ?Sized> Uniform for R {
    fn uniform(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

impl<T> Ring<T> {
    /// Shuffles the elements in place, so that each permutation is equally
    /// likely if `rng` is unbiased.
    ///
    /// The first `remaining` nodes are not placed yet. Each round picks one of
    /// them and moves it to the back, until only one is left. An index drawn
    /// out of range is clamped to the last unplaced node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*<sup>2</sup>) time and *O*(1)
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "rand")]
    /// # {
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use ring_queue::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(0..10);
    /// ring.shuffle(&mut StdRng::seed_from_u64(7));
    ///
    /// let mut shuffled = Vec::from_iter(ring);
    /// shuffled.sort();
    /// assert_eq!(shuffled, Vec::from_iter(0..10));
    /// # }
    /// ```
    pub fn shuffle<U: Uniform + ?Sized>(&mut self, rng: &mut U) {
        let ghost = self.ghost_node();
        let mut remaining = self.len();
        while remaining > 1 {
            let steps = rng.uniform(remaining).min(remaining - 1);
            let mut picked = self.front_node();
            // SAFETY: `steps < remaining`, so `picked` is one of the first
            // `remaining` nodes, which are never the ghost node.
            unsafe {
                for _ in 0..steps {
                    picked = next_of(picked);
                }
                if next_of(picked) != ghost {
                    move_node(picked, ghost);
                }
            }
            remaining -= 1;
        }
    }
}
