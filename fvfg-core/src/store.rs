//! Store — state views on disk
//!
//! Each view is a headerless flat file of `4 * dim * dim` entries:
//!
//! | File | Entry |
//! |------|-------|
//! | `CHM_<g>.bin` | `u32` little-endian |
//! | `CSM_<g>.bin` | `u8` |
//! | `HCM_<g>.bin` | `u32` little-endian |
//! | `HSM_<g>.bin` | `u8` |

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FvfgError, FvfgResult, TableKind};
use crate::tables::{check_group_size, StateTables};

/// Path of one view inside `dir`
pub fn view_path(dir: &Path, kind: TableKind, group_size: u32) -> PathBuf {
    dir.join(format!("{}_{}.bin", kind.file_stem(), group_size))
}

/// Read exactly `entries` little-endian `u32` keys.
pub fn read_key_view<R: Read>(reader: R, kind: TableKind, entries: usize) -> FvfgResult<Vec<u32>> {
    let mut buf = read_exact_view(reader, kind, entries)?;
    let mut keys = Vec::with_capacity(entries);
    while buf.has_remaining() {
        keys.push(buf.get_u32_le());
    }
    Ok(keys)
}

/// Read exactly `entries` one-byte states.
pub fn read_state_view<R: Read>(reader: R, kind: TableKind, entries: usize) -> FvfgResult<Vec<u8>> {
    Ok(read_exact_view(reader, kind, entries)?.to_vec())
}

fn read_exact_view<R: Read>(mut reader: R, kind: TableKind, entries: usize) -> FvfgResult<Bytes> {
    let mut raw = Vec::with_capacity(entries * kind.entry_width());
    reader
        .read_to_end(&mut raw)
        .map_err(|e| FvfgError::io(kind.file_stem(), e))?;

    let width = kind.entry_width();
    if raw.len() != entries * width {
        return Err(FvfgError::MalformedTable {
            table: kind,
            expected: entries,
            found: raw.len() / width,
        });
    }
    Ok(Bytes::from(raw))
}

/// Load the four views for `group_size` from `dir`.
pub fn load_dir<P: AsRef<Path>>(dir: P, group_size: u32) -> FvfgResult<StateTables> {
    let dir = dir.as_ref();
    check_group_size(group_size)?;
    let entries = StateTables::required_len(group_size);

    tracing::info!(dir = %dir.display(), group_size, "loading state views");

    let encode_keys = read_key_view(open(dir, TableKind::EncodeKeys, group_size)?, TableKind::EncodeKeys, entries)?;
    let encode_states = read_state_view(open(dir, TableKind::EncodeStates, group_size)?, TableKind::EncodeStates, entries)?;
    let decode_keys = read_key_view(open(dir, TableKind::DecodeKeys, group_size)?, TableKind::DecodeKeys, entries)?;
    let decode_states = read_state_view(open(dir, TableKind::DecodeStates, group_size)?, TableKind::DecodeStates, entries)?;

    StateTables::new(group_size, encode_keys, encode_states, decode_keys, decode_states)
}

fn open(dir: &Path, kind: TableKind, group_size: u32) -> FvfgResult<fs::File> {
    let path = view_path(dir, kind, group_size);
    tracing::debug!(path = %path.display(), "opening state view");
    fs::File::open(&path).map_err(|e| FvfgError::io(path, e))
}

/// Write the four views of `tables` into `dir`, creating it if needed.
pub fn save_dir<P: AsRef<Path>>(tables: &StateTables, dir: P) -> FvfgResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| FvfgError::io(dir, e))?;
    let g = tables.group_size();

    write_view(dir, TableKind::EncodeKeys, g, &encode_key_bytes(tables.encode_keys()))?;
    write_view(dir, TableKind::EncodeStates, g, tables.encode_states())?;
    write_view(dir, TableKind::DecodeKeys, g, &encode_key_bytes(tables.decode_keys()))?;
    write_view(dir, TableKind::DecodeStates, g, tables.decode_states())?;

    tracing::info!(dir = %dir.display(), group_size = g, "state views saved");
    Ok(())
}

fn encode_key_bytes(keys: &[u32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(keys.len() * 4);
    for &key in keys {
        buf.put_u32_le(key);
    }
    buf.freeze()
}

fn write_view(dir: &Path, kind: TableKind, group_size: u32, data: &[u8]) -> FvfgResult<()> {
    let path = view_path(dir, kind, group_size);
    tracing::debug!(path = %path.display(), bytes = data.len(), "writing state view");
    fs::write(&path, data).map_err(|e| FvfgError::io(path, e))
}
