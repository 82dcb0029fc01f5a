//! StateTables — the four state views of the group automaton
//!
//! Each view is a flat buffer standing in for a 3D table:
//!
//! | View | Index | Value |
//! |------|-------|-------|
//! | `CHM` encode keys | `(state, gx, gy)` | `2g`-bit index chunk |
//! | `CSM` encode states | `(state, gx, gy)` | next state |
//! | `HCM` decode keys | `(state, code)` | `(gx << g) \| gy` |
//! | `HSM` decode states | `(state, code)` | next state |
//!
//! Offsets are `state * dim² + dim * gx + gy` for the encode views and
//! `state * dim² + code` for the decode views.

use std::fmt;
use std::sync::Arc;

use crate::error::{FvfgError, FvfgResult, TableKind};

/// Number of automaton states reserved per view
pub const NUM_STATES: usize = 4;

/// Largest group size whose views can be addressed
pub const MAX_GROUP_SIZE: u32 = 12;

/// Immutable automaton tables for one group size.
///
/// Cloning shares the underlying buffers.
#[derive(Clone)]
pub struct StateTables {
    group_size: u32,
    dim_size: usize,
    encode_keys: Arc<[u32]>,
    encode_states: Arc<[u8]>,
    decode_keys: Arc<[u32]>,
    decode_states: Arc<[u8]>,
}

impl StateTables {
    /// Build tables from the four raw views.
    ///
    /// Every view must hold exactly [`StateTables::required_len`] entries, every
    /// state entry must be below [`NUM_STATES`] and every key must fit in
    /// `2 * group_size` bits.
    pub fn new(
        group_size: u32,
        encode_keys: Vec<u32>,
        encode_states: Vec<u8>,
        decode_keys: Vec<u32>,
        decode_states: Vec<u8>,
    ) -> FvfgResult<Self> {
        check_group_size(group_size)?;
        let expected = Self::required_len(group_size);

        check_len(TableKind::EncodeKeys, expected, encode_keys.len())?;
        check_len(TableKind::EncodeStates, expected, encode_states.len())?;
        check_len(TableKind::DecodeKeys, expected, decode_keys.len())?;
        check_len(TableKind::DecodeStates, expected, decode_states.len())?;

        let key_limit = 1u32 << (2 * group_size);
        check_keys(TableKind::EncodeKeys, &encode_keys, key_limit)?;
        check_keys(TableKind::DecodeKeys, &decode_keys, key_limit)?;
        check_states(TableKind::EncodeStates, &encode_states)?;
        check_states(TableKind::DecodeStates, &decode_states)?;

        tracing::debug!(group_size, entries = expected, "state views accepted");

        Ok(Self {
            group_size,
            dim_size: 1usize << group_size,
            encode_keys: encode_keys.into(),
            encode_states: encode_states.into(),
            decode_keys: decode_keys.into(),
            decode_states: decode_states.into(),
        })
    }

    /// Entries per view for `group_size`: `4 * dim * dim`
    pub const fn required_len(group_size: u32) -> usize {
        let dim = 1usize << group_size;
        NUM_STATES * dim * dim
    }

    /// Bits of each axis consumed per automaton step
    #[inline]
    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    /// `2^group_size`
    #[inline]
    pub fn dim_size(&self) -> usize {
        self.dim_size
    }

    pub fn entries_per_table(&self) -> usize {
        self.encode_keys.len()
    }

    /// One encode transition. `state < 4`, `gx, gy < dim_size`.
    #[inline(always)]
    pub(crate) fn encode_step(&self, state: u8, gx: u32, gy: u32) -> (u32, u8) {
        let pos = self.encode_offset(state, gx, gy);
        (self.encode_keys[pos], self.encode_states[pos])
    }

    /// One decode transition. `state < 4`, `code < dim_size²`.
    #[inline(always)]
    pub(crate) fn decode_step(&self, state: u8, code: u32) -> (u32, u8) {
        let pos = self.decode_offset(state, code);
        (self.decode_keys[pos], self.decode_states[pos])
    }

    /// Checked encode lookup: `(key chunk, next state)`
    pub fn encode_entry(&self, state: u8, gx: u32, gy: u32) -> Option<(u32, u8)> {
        if (state as usize) < NUM_STATES
            && (gx as usize) < self.dim_size
            && (gy as usize) < self.dim_size
        {
            Some(self.encode_step(state, gx, gy))
        } else {
            None
        }
    }

    /// Checked decode lookup: `(packed gx/gy, next state)`
    pub fn decode_entry(&self, state: u8, code: u32) -> Option<(u32, u8)> {
        if (state as usize) < NUM_STATES && (code as usize) < self.dim_size * self.dim_size {
            Some(self.decode_step(state, code))
        } else {
            None
        }
    }

    #[inline(always)]
    fn encode_offset(&self, state: u8, gx: u32, gy: u32) -> usize {
        let dim = self.dim_size;
        state as usize * dim * dim + dim * gx as usize + gy as usize
    }

    #[inline(always)]
    fn decode_offset(&self, state: u8, code: u32) -> usize {
        let dim = self.dim_size;
        state as usize * dim * dim + code as usize
    }

    pub fn encode_keys(&self) -> &[u32] {
        &self.encode_keys
    }

    pub fn encode_states(&self) -> &[u8] {
        &self.encode_states
    }

    pub fn decode_keys(&self) -> &[u32] {
        &self.decode_keys
    }

    pub fn decode_states(&self) -> &[u8] {
        &self.decode_states
    }
}

impl fmt::Debug for StateTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTables")
            .field("group_size", &self.group_size)
            .field("dim_size", &self.dim_size)
            .field("entries_per_table", &self.entries_per_table())
            .finish()
    }
}

pub(crate) fn check_group_size(group_size: u32) -> FvfgResult<()> {
    if group_size == 0 || group_size > MAX_GROUP_SIZE {
        return Err(FvfgError::InvalidParameter(format!(
            "group size {} outside [1, {}]",
            group_size, MAX_GROUP_SIZE
        )));
    }
    Ok(())
}

fn check_len(table: TableKind, expected: usize, found: usize) -> FvfgResult<()> {
    if expected != found {
        return Err(FvfgError::MalformedTable {
            table,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_keys(table: TableKind, keys: &[u32], limit: u32) -> FvfgResult<()> {
    match keys.iter().position(|&k| k >= limit) {
        Some(offset) => Err(FvfgError::EntryOutOfRange {
            table,
            offset,
            value: keys[offset],
            limit,
        }),
        None => Ok(()),
    }
}

fn check_states(table: TableKind, states: &[u8]) -> FvfgResult<()> {
    match states.iter().position(|&s| s as usize >= NUM_STATES) {
        Some(offset) => Err(FvfgError::EntryOutOfRange {
            table,
            offset,
            value: states[offset] as u32,
            limit: NUM_STATES as u32,
        }),
        None => Ok(()),
    }
}
