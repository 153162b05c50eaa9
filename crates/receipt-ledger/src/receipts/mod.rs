//! Receipt intake, reward scoring, and the in-memory points ledger.
//!
//! The write path runs draft -> validated [`Receipt`] -> scored record in the
//! [`ReceiptStore`]; the read path is a point lookup by generated id. The
//! domain and scoring halves are pure, so only the store carries shared state.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod store;

pub use domain::{
    Amount, Description, Item, ItemDraft, PurchaseDate, PurchaseTime, Receipt, ReceiptDraft,
    Retailer, ValidationError,
};
pub use router::receipt_router;
pub use scoring::{breakdown, total, RuleScore};
pub use store::{ReceiptId, ReceiptRecord, ReceiptStore, StoreError};
