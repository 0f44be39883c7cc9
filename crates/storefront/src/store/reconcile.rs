//! One-shot cart reconciliation for legacy product identifiers.
//!
//! The storefront once shipped with a static catalog whose identifiers were
//! namespaced with a leading `p`. Carts persisted against that catalog can
//! still be on disk. At process start the cart is scanned once: identifiers
//! are stripped of the legacy prefix and kept only if the remainder is a
//! strictly positive integer; everything else is evicted with a diagnostic
//! log. New invalid ids are never produced in normal flow, so this is a
//! data migration, not an ongoing invariant.

use dgency_core::ProductId;

use super::cart::{CartLine, CartStore};

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    /// Lines kept (possibly with a rewritten identifier).
    pub kept: usize,
    /// Lines whose identifier was rewritten to its canonical numeric form.
    pub rewritten: usize,
    /// Lines evicted because no valid identifier could be recovered.
    pub evicted: usize,
}

impl ReconcileSummary {
    /// Whether the pass changed the stored cart.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.rewritten > 0 || self.evicted > 0
    }
}

/// Scan the stored cart once, canonicalizing legacy identifiers and
/// evicting lines that fail validation. Writes back only when something
/// changed.
pub fn reconcile_cart(cart: &CartStore) -> ReconcileSummary {
    let lines = cart.items();
    let mut summary = ReconcileSummary::default();
    let mut valid: Vec<CartLine> = Vec::with_capacity(lines.len());

    for mut line in lines {
        match ProductId::parse_legacy(&line.id) {
            Some(id) => {
                let canonical = id.to_string();
                if line.id != canonical {
                    tracing::info!(from = %line.id, to = %canonical, "Rewriting legacy cart id");
                    line.id = canonical;
                    summary.rewritten += 1;
                }
                summary.kept += 1;
                valid.push(line);
            }
            None => {
                tracing::warn!(id = %line.id, name = %line.name, "Evicting invalid cart line");
                summary.evicted += 1;
            }
        }
    }

    if summary.changed() {
        tracing::info!(
            kept = summary.kept,
            rewritten = summary.rewritten,
            evicted = summary.evicted,
            "Cart reconciliation rewrote stored cart"
        );
        cart.replace(valid);
    }

    summary
}
