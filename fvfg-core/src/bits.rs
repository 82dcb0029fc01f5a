//! Bit-group slicing
//!
//! Bit 0 is the least significant bit. A field of `width` bits "ending" at `end`
//! occupies bits `end - width + 1 ..= end`.

/// Mask with the `width` low bits set.
///
/// `width` must be in `1..=64`.
#[inline(always)]
pub const fn ones(width: u32) -> u64 {
    debug_assert!(width >= 1 && width <= 64);
    u64::MAX >> (64 - width)
}

/// Extract the `width`-bit field of `value` whose most significant bit is `end`.
///
/// Preconditions (caller-maintained, checked only in debug builds):
/// `1 <= width <= 64`, `end + 1 >= width` and `end - width + 1 < 64`.
/// `end` itself may lie above bit 63; the missing high bits read as zero.
#[inline(always)]
pub const fn slice_bits(value: u64, end: u32, width: u32) -> u64 {
    debug_assert!(end + 1 >= width);
    let shift = end + 1 - width;
    debug_assert!(shift < 64);
    (value >> shift) & ones(width)
}

/// `ceil(order / group_size)` for positive inputs
#[inline(always)]
pub const fn group_count(order: u32, group_size: u32) -> u32 {
    (order - 1) / group_size + 1
}

/// Automaton state for the top group.
///
/// The virtual zero bits padded above `order` each flip the curve's orientation
/// once, so only their parity matters.
#[inline(always)]
pub const fn initial_state(order: u32, group_size: u32) -> u8 {
    let padding = group_size * group_count(order, group_size) - order;
    (padding % 2) as u8
}
