// ── Import / export seams ──
//
// The Config Files panel drives these traits. Nothing behind them is
// wired yet: `Unwired` answers every request with `Unsupported` so the UI
// can report it instead of pretending the file moved.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::model::Voucher;

/// The file operations the Config Files panel offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    VoucherImport,
    VoucherExport,
    ConfigBackup,
    ConfigRestore,
}

impl TransferKind {
    pub const ALL: [Self; 4] = [
        Self::VoucherImport,
        Self::VoucherExport,
        Self::ConfigBackup,
        Self::ConfigRestore,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::VoucherImport => "Import Vouchers",
            Self::VoucherExport => "Export Vouchers",
            Self::ConfigBackup => "Backup Router Config",
            Self::ConfigRestore => "Restore Router Config",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VoucherImport => "Load a Mikhmon voucher export (.csv)",
            Self::VoucherExport => "Write printable vouchers (.pdf)",
            Self::ConfigBackup => "Save the router configuration (.rsc)",
            Self::ConfigRestore => "Apply a saved router configuration (.rsc)",
        }
    }

    /// File extension the operation expects.
    pub fn extension(self) -> &'static str {
        match self {
            Self::VoucherImport => "csv",
            Self::VoucherExport => "pdf",
            Self::ConfigBackup | Self::ConfigRestore => "rsc",
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub trait VoucherImporter {
    fn import(&self, path: &Path) -> Result<Vec<Voucher>, CoreError>;
}

pub trait VoucherExporter {
    fn export(&self, vouchers: &[Voucher], path: &Path) -> Result<(), CoreError>;
}

pub trait ConfigBackup {
    fn backup(&self, router: &str, path: &Path) -> Result<(), CoreError>;
    fn restore(&self, router: &str, path: &Path) -> Result<(), CoreError>;
}

/// Default implementation of every transfer seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unwired;

impl Unwired {
    fn refuse(kind: TransferKind, path: &Path) -> CoreError {
        debug!(%kind, path = %path.display(), "transfer not wired");
        CoreError::Unsupported {
            operation: kind.title().to_owned(),
        }
    }
}

impl VoucherImporter for Unwired {
    fn import(&self, path: &Path) -> Result<Vec<Voucher>, CoreError> {
        Err(Self::refuse(TransferKind::VoucherImport, path))
    }
}

impl VoucherExporter for Unwired {
    fn export(&self, _vouchers: &[Voucher], path: &Path) -> Result<(), CoreError> {
        Err(Self::refuse(TransferKind::VoucherExport, path))
    }
}

impl ConfigBackup for Unwired {
    fn backup(&self, _router: &str, path: &Path) -> Result<(), CoreError> {
        Err(Self::refuse(TransferKind::ConfigBackup, path))
    }

    fn restore(&self, _router: &str, path: &Path) -> Result<(), CoreError> {
        Err(Self::refuse(TransferKind::ConfigRestore, path))
    }
}
