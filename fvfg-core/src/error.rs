//! Erros do FVFG
//!
//! Every variant is raised at a boundary (table construction, file loading, call
//! entry, config parsing). The per-group loops themselves never fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Resultado de operações FVFG
pub type FvfgResult<T> = Result<T, FvfgError>;

/// Identifies one of the four state views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// `CHM`: `(state, gx, gy)` → index chunk
    EncodeKeys,
    /// `CSM`: `(state, gx, gy)` → next state
    EncodeStates,
    /// `HCM`: `(state, code)` → packed `(gx, gy)`
    DecodeKeys,
    /// `HSM`: `(state, code)` → next state
    DecodeStates,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::EncodeKeys,
        TableKind::EncodeStates,
        TableKind::DecodeKeys,
        TableKind::DecodeStates,
    ];

    /// Short name used in state-view file names (`CHM_8.bin`, ...)
    pub const fn file_stem(self) -> &'static str {
        match self {
            TableKind::EncodeKeys => "CHM",
            TableKind::EncodeStates => "CSM",
            TableKind::DecodeKeys => "HCM",
            TableKind::DecodeStates => "HSM",
        }
    }

    /// Width in bytes of one persisted entry
    pub const fn entry_width(self) -> usize {
        match self {
            TableKind::EncodeKeys | TableKind::DecodeKeys => 4,
            TableKind::EncodeStates | TableKind::DecodeStates => 1,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::EncodeKeys => "encode-key",
            TableKind::EncodeStates => "encode-state",
            TableKind::DecodeKeys => "decode-key",
            TableKind::DecodeStates => "decode-state",
        };
        write!(f, "{} ({})", name, self.file_stem())
    }
}

/// Erros de construção, carregamento e parâmetros
#[derive(Debug, Error)]
pub enum FvfgError {
    /// Table length does not match `4 * dim_size * dim_size`
    #[error("Malformed {table} table: expected {expected} entries, found {found}")]
    MalformedTable {
        table: TableKind,
        expected: usize,
        found: usize,
    },

    /// A state entry `>= 4`, or a key wider than `2 * group_size` bits
    #[error("Malformed {table} table: entry {offset} holds {value}, limit is {limit}")]
    EntryOutOfRange {
        table: TableKind,
        offset: usize,
        value: u32,
        limit: u32,
    },

    /// Order, group size, coordinate or index outside the supported range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Erro de I/O
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Erro de configuração (fvfg.toml)
    #[error("Config error: {0}")]
    Config(String),
}

impl FvfgError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FvfgError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for both table construction failures
    pub fn is_malformed_table(&self) -> bool {
        matches!(
            self,
            FvfgError::MalformedTable { .. } | FvfgError::EntryOutOfRange { .. }
        )
    }
}
