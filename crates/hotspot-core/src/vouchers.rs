// ── Voucher list with search ──
//
// The query is the only mutable state; the filtered view is recomputed
// on demand so it can never drift from the list.

use strum::IntoEnumIterator;

use crate::error::CoreError;
use crate::model::{EntityId, Voucher, VoucherStatus};

/// Per-status tally of the voucher list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoucherCounts {
    pub total: usize,
    pub active: usize,
    pub used: usize,
    pub expired: usize,
}

impl VoucherCounts {
    pub fn of(&self, status: VoucherStatus) -> usize {
        match status {
            VoucherStatus::Active => self.active,
            VoucherStatus::Used => self.used,
            VoucherStatus::Expired => self.expired,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VoucherBook {
    vouchers: Vec<Voucher>,
    query: String,
}

impl VoucherBook {
    pub fn new(vouchers: Vec<Voucher>) -> Self {
        Self {
            vouchers,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn all(&self) -> &[Voucher] {
        &self.vouchers
    }

    /// Vouchers whose code or location contains the query, ignoring case,
    /// in original order. An empty query matches everything.
    pub fn filtered(&self) -> Vec<&Voucher> {
        let needle = self.query.to_lowercase();
        self.vouchers
            .iter()
            .filter(|v| {
                needle.is_empty()
                    || v.code.to_lowercase().contains(&needle)
                    || v.location.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn get(&self, id: &EntityId) -> Result<&Voucher, CoreError> {
        self.vouchers
            .iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| CoreError::not_found("voucher", id.as_str()))
    }

    /// Status counts over the whole list, independent of the query.
    pub fn counts(&self) -> VoucherCounts {
        let mut counts = VoucherCounts {
            total: self.vouchers.len(),
            ..VoucherCounts::default()
        };
        for status in VoucherStatus::iter() {
            let n = self.vouchers.iter().filter(|v| v.status == status).count();
            match status {
                VoucherStatus::Active => counts.active = n,
                VoucherStatus::Used => counts.used = n,
                VoucherStatus::Expired => counts.expired = n,
            }
        }
        counts
    }
}
