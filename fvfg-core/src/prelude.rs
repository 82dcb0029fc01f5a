//! Prelude — tipos e funções mais usados
//!
//! ```
//! use fvfg_core::prelude::*;
//! ```

pub use crate::error::{FvfgError, FvfgResult, TableKind};
pub use crate::store;
pub use crate::tables::{StateTables, MAX_GROUP_SIZE};
pub use crate::transform::{
    decode, decode_batch, decode_slice, encode, encode_batch, encode_slice, BatchContext,
    Direction, MAX_ORDER,
};
pub use crate::config::FvfgConfig;
