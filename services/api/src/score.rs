use std::fs;
use std::path::PathBuf;

use clap::Args;
use receipt_ledger::error::AppError;
use receipt_ledger::receipts::{scoring, Receipt, ReceiptDraft};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) receipt: PathBuf,
    /// Print the per-rule contributions alongside the total
    #[arg(long)]
    pub(crate) breakdown: bool,
}

/// Offline scoring path: same validator and engine the server uses, no store.
pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.receipt)?;
    let draft: ReceiptDraft = serde_json::from_str(&raw)?;
    let receipt = Receipt::from_draft(draft)?;

    if args.breakdown {
        for entry in scoring::breakdown(&receipt) {
            println!("{:>5}  {}", entry.points, entry.rule);
        }
    }

    println!("{}", scoring::total(&receipt));
    Ok(())
}
