//! # FVFG-Core
//!
//! Group-based Hilbert curve encoding and decoding ("virtual filling" group
//! algorithm). Instead of walking the curve one bit per axis per step, the
//! transform consumes `group_size` bits of each axis at a time by looking up a
//! precomputed finite-state automaton: the four *state views*.
//!
//! ## Computational Complexity
//!
//! - `encode` / `decode`: O(⌈order / group_size⌉) table lookups
//! - `StateTables::new`: O(4 · 4^group_size), once per process
//!
//! ## Módulos
//!
//! - [`bits`]: bit-group slicing and the virtual-filling arithmetic
//! - [`tables`]: [`StateTables`], the immutable automaton
//! - [`transform`]: encode/decode, batch contexts and slice helpers
//! - [`store`]: reading and writing state views (`CHM_<g>.bin`, ...)
//! - [`config`]: `fvfg.toml`
//! - [`error`]: [`FvfgError`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use fvfg_core::prelude::*;
//!
//! let tables = store::load_dir("state-views", 8)?;
//! let index = encode(3, 5, 21, 8, &tables)?;
//! let (x, y) = decode(index, 21, 8, &tables)?;
//! ```
//!
//! ## Princípios
//!
//! 1. **Tables are read-only** — built once, shared by reference across threads
//! 2. **Validation at the boundary** — the per-group loop cannot fail
//! 3. **Same input, same output** — every call is independent

pub mod bits;
pub mod config;
pub mod error;
pub mod prelude;
pub mod store;
pub mod tables;
pub mod transform;

pub use config::{FvfgConfig, TablesConfig, TransformConfig, CONFIG_FILE};
pub use error::{FvfgError, FvfgResult, TableKind};
pub use tables::{StateTables, MAX_GROUP_SIZE, NUM_STATES};
pub use transform::{
    decode, decode_batch, decode_slice, encode, encode_batch, encode_slice, BatchContext,
    Direction, MAX_ORDER,
};

#[cfg(feature = "parallel")]
pub use transform::{par_decode_slice, par_encode_slice};
