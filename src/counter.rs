//! Rolling message counters.
//!
//! Builders take the counter as a plain argument and never advance it.
//! [`Counter`] is an opt-in helper for callers that want wrapping handled for
//! them.

/// A counter that wraps at `2^BITS`.
///
/// Iterating yields the current value and advances; the iterator never ends.
///
/// ```
/// use tesla_can::Counter4;
///
/// let mut counter = Counter4::starting_at(14);
/// assert_eq!(counter.by_ref().take(4).collect::<Vec<_>>(), [14, 15, 0, 1]);
/// assert_eq!(counter.current(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counter<const BITS: u8> {
    value: u8,
}

/// Counter covering the 0..=15 range seen on the bus.
pub type Counter4 = Counter<4>;

/// Counter covering the full 6-bit steering control counter field.
pub type SteeringCounter = Counter<6>;

/// Counter covering a full counter byte.
pub type Counter8 = Counter<8>;

impl<const BITS: u8> Counter<BITS> {
    /// Bit mask of the values this counter produces.
    pub const MASK: u8 = {
        assert!(BITS >= 1 && BITS <= 8, "counter width must be 1 to 8 bits");
        (((1u16 << BITS) - 1) & 0xFF) as u8
    };

    /// A counter at zero.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// A counter at `value`, masked to the counter width.
    pub const fn starting_at(value: u8) -> Self {
        Self {
            value: value & Self::MASK,
        }
    }

    /// Value the next call to `next` returns.
    #[inline]
    pub const fn current(&self) -> u8 {
        self.value
    }
}

impl<const BITS: u8> Iterator for Counter<BITS> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        let value = self.value;
        self.value = value.wrapping_add(1) & Self::MASK;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<const BITS: u8> core::iter::FusedIterator for Counter<BITS> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks() {
        assert_eq!(Counter4::MASK, 0x0F);
        assert_eq!(SteeringCounter::MASK, 0x3F);
        assert_eq!(Counter8::MASK, 0xFF);
    }

    #[test]
    fn test_wraps() {
        let mut counter = Counter4::new();
        let values: Vec<u8> = counter.by_ref().take(18).collect();
        assert_eq!(values[15], 15);
        assert_eq!(values[16], 0);
        assert_eq!(values[17], 1);

        let mut byte = Counter8::starting_at(255);
        assert_eq!(byte.next(), Some(255));
        assert_eq!(byte.next(), Some(0));
    }

    #[test]
    fn test_starting_value_masked() {
        assert_eq!(SteeringCounter::starting_at(0x45).current(), 0x05);
    }
}
