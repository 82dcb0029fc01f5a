//! Group-based Hilbert encoding and decoding
//!
//! ## Virtual filling
//!
//! When `order` is not a multiple of `group_size`, the top group is padded with
//! zero bits so every step consumes a full group. Each padded bit flips the curve
//! orientation once, so the walk starts in state `padding % 2` and the padded
//! positions emit zero index bits.
//!
//! ## Complexity
//!
//! `encode`/`decode`: O(⌈order / group_size⌉) lookups, no allocation.
//!
//! ## Exemplo
//!
//! ```ignore
//! use fvfg_core::prelude::*;
//!
//! let tables = store::load_dir("state-views", 8)?;
//! let index = encode(3, 5, 21, 8, &tables)?;
//! assert_eq!(decode(index, 21, 8, &tables)?, (3, 5));
//!
//! let ctx = BatchContext::for_encode(21, 8, &tables)?;
//! assert_eq!(encode_batch(3, 5, &ctx, &tables), index);
//! ```

use crate::bits::{group_count, initial_state, ones, slice_bits};
use crate::error::{FvfgError, FvfgResult};
use crate::tables::{check_group_size, StateTables};

/// Largest order a 64-bit index can hold
pub const MAX_ORDER: u32 = 32;

/// Direction a [`BatchContext`] was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Values shared by every call with the same order and group size.
///
/// `start_pos` is the end bit of the top group: `group_num * group_size - 1` over
/// a coordinate when encoding, `2 * group_num * group_size - 1` over the index
/// when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchContext {
    direction: Direction,
    order: u32,
    group_size: u32,
    group_num: u32,
    dim_size: usize,
    start_pos: u32,
    state0: u8,
}

impl BatchContext {
    /// Precompute the encode walk for `order` bits per axis.
    pub fn for_encode(order: u32, group_size: u32, tables: &StateTables) -> FvfgResult<Self> {
        Self::build(Direction::Encode, order, group_size, tables)
    }

    /// Precompute the decode walk for `order` bits per axis.
    pub fn for_decode(order: u32, group_size: u32, tables: &StateTables) -> FvfgResult<Self> {
        Self::build(Direction::Decode, order, group_size, tables)
    }

    fn build(
        direction: Direction,
        order: u32,
        group_size: u32,
        tables: &StateTables,
    ) -> FvfgResult<Self> {
        validate(order, group_size, tables)?;

        let group_num = group_count(order, group_size);
        let start_pos = match direction {
            Direction::Encode => group_num * group_size - 1,
            Direction::Decode => 2 * group_num * group_size - 1,
        };

        Ok(Self {
            direction,
            order,
            group_size,
            group_num,
            dim_size: 1usize << group_size,
            start_pos,
            state0: initial_state(order, group_size),
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    /// Number of automaton steps per call
    pub fn group_num(&self) -> u32 {
        self.group_num
    }

    pub fn dim_size(&self) -> usize {
        self.dim_size
    }

    pub fn start_pos(&self) -> u32 {
        self.start_pos
    }

    /// Automaton state before the top group
    pub fn state0(&self) -> u8 {
        self.state0
    }
}

/// Check order and group size against the tables.
pub fn validate(order: u32, group_size: u32, tables: &StateTables) -> FvfgResult<()> {
    if order == 0 || order > MAX_ORDER {
        return Err(FvfgError::InvalidParameter(format!(
            "order {} outside [1, {}]",
            order, MAX_ORDER
        )));
    }
    check_group_size(group_size)?;
    if group_size != tables.group_size() {
        return Err(FvfgError::InvalidParameter(format!(
            "group size {} does not match tables built for group size {}",
            group_size,
            tables.group_size()
        )));
    }
    Ok(())
}

/// Map `(x, y)` to its Hilbert index on a `2^order × 2^order` grid.
pub fn encode(x: u32, y: u32, order: u32, group_size: u32, tables: &StateTables) -> FvfgResult<u64> {
    let ctx = BatchContext::for_encode(order, group_size, tables)?;
    let limit = 1u64 << order;
    if x as u64 >= limit || y as u64 >= limit {
        return Err(FvfgError::InvalidParameter(format!(
            "coordinate ({}, {}) outside a 2^{} grid",
            x, y, order
        )));
    }
    Ok(encode_batch(x, y, &ctx, tables))
}

/// Map a Hilbert index back to `(x, y)`. Exact inverse of [`encode`].
pub fn decode(index: u64, order: u32, group_size: u32, tables: &StateTables) -> FvfgResult<(u32, u32)> {
    let ctx = BatchContext::for_decode(order, group_size, tables)?;
    if order < MAX_ORDER && index >= 1u64 << (2 * order) {
        return Err(FvfgError::InvalidParameter(format!(
            "index {} outside a curve of order {}",
            index, order
        )));
    }
    Ok(decode_batch(index, &ctx, tables))
}

/// [`encode`] with the fixed per-order work hoisted into `ctx`.
///
/// `ctx` must come from [`BatchContext::for_encode`] against tables with the same
/// group size, and `x, y < 2^order`.
#[inline]
pub fn encode_batch(x: u32, y: u32, ctx: &BatchContext, tables: &StateTables) -> u64 {
    debug_assert_eq!(ctx.direction, Direction::Encode);
    debug_assert_eq!(ctx.group_size, tables.group_size());

    let g = ctx.group_size;
    let (x, y) = (x as u64, y as u64);
    let mut state = ctx.state0;
    let mut hcode = 0u64;

    for step in 0..ctx.group_num {
        let end = ctx.start_pos - step * g;
        let gx = slice_bits(x, end, g) as u32;
        let gy = slice_bits(y, end, g) as u32;
        let (key, next) = tables.encode_step(state, gx, gy);
        // padded top bits shift out past bit 63; they are always zero
        hcode = (hcode << (2 * g)) | key as u64;
        state = next;
    }

    hcode
}

/// [`decode`] with the fixed per-order work hoisted into `ctx`.
///
/// `ctx` must come from [`BatchContext::for_decode`].
#[inline]
pub fn decode_batch(index: u64, ctx: &BatchContext, tables: &StateTables) -> (u32, u32) {
    debug_assert_eq!(ctx.direction, Direction::Decode);
    debug_assert_eq!(ctx.group_size, tables.group_size());

    let g = ctx.group_size;
    let mask = ones(g) as u32;
    let mut state = ctx.state0;
    let (mut x, mut y) = (0u32, 0u32);

    for step in 0..ctx.group_num {
        let end = ctx.start_pos - step * 2 * g;
        let code = slice_bits(index, end, 2 * g) as u32;
        let (packed, next) = tables.decode_step(state, code);
        y = (y << g) | (packed & mask);
        x = (x << g) | ((packed >> g) & mask);
        state = next;
    }

    (x, y)
}

/// Encode parallel coordinate slices into `out`.
pub fn encode_slice(
    ctx: &BatchContext,
    tables: &StateTables,
    xs: &[u32],
    ys: &[u32],
    out: &mut [u64],
) -> FvfgResult<()> {
    check_lengths(xs.len(), &[ys.len(), out.len()])?;
    for ((&x, &y), slot) in xs.iter().zip(ys).zip(out.iter_mut()) {
        *slot = encode_batch(x, y, ctx, tables);
    }
    Ok(())
}

/// Decode `indices` into parallel coordinate slices.
pub fn decode_slice(
    ctx: &BatchContext,
    tables: &StateTables,
    indices: &[u64],
    out_x: &mut [u32],
    out_y: &mut [u32],
) -> FvfgResult<()> {
    check_lengths(indices.len(), &[out_x.len(), out_y.len()])?;
    for ((&index, sx), sy) in indices.iter().zip(out_x.iter_mut()).zip(out_y.iter_mut()) {
        (*sx, *sy) = decode_batch(index, ctx, tables);
    }
    Ok(())
}

/// [`encode_slice`] split across the rayon pool.
#[cfg(feature = "parallel")]
pub fn par_encode_slice(
    ctx: &BatchContext,
    tables: &StateTables,
    xs: &[u32],
    ys: &[u32],
    out: &mut [u64],
) -> FvfgResult<()> {
    use rayon::prelude::*;

    check_lengths(xs.len(), &[ys.len(), out.len()])?;
    out.par_iter_mut()
        .zip(xs.par_iter().zip(ys.par_iter()))
        .for_each(|(slot, (&x, &y))| *slot = encode_batch(x, y, ctx, tables));
    Ok(())
}

/// [`decode_slice`] split across the rayon pool.
#[cfg(feature = "parallel")]
pub fn par_decode_slice(
    ctx: &BatchContext,
    tables: &StateTables,
    indices: &[u64],
    out_x: &mut [u32],
    out_y: &mut [u32],
) -> FvfgResult<()> {
    use rayon::prelude::*;

    check_lengths(indices.len(), &[out_x.len(), out_y.len()])?;
    indices
        .par_iter()
        .zip(out_x.par_iter_mut().zip(out_y.par_iter_mut()))
        .for_each(|(&index, (sx, sy))| (*sx, *sy) = decode_batch(index, ctx, tables));
    Ok(())
}

fn check_lengths(expected: usize, others: &[usize]) -> FvfgResult<()> {
    if let Some(&found) = others.iter().find(|&&len| len != expected) {
        return Err(FvfgError::InvalidParameter(format!(
            "slice length mismatch: expected {}, found {}",
            expected, found
        )));
    }
    Ok(())
}
