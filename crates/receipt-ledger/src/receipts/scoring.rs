use serde::Serialize;

use super::domain::{Item, Receipt};

/// Discrete contribution of one reward rule, so callers can show how a
/// total was earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleScore {
    pub rule: &'static str,
    pub points: u64,
}

/// Total points earned by a validated receipt. Pure and deterministic.
pub fn total(receipt: &Receipt) -> u64 {
    breakdown(receipt).iter().map(|entry| entry.points).sum()
}

/// Per-rule contributions, in a fixed rule order.
pub fn breakdown(receipt: &Receipt) -> Vec<RuleScore> {
    vec![
        RuleScore {
            rule: "retailer alphanumeric characters",
            points: retailer_alphanumeric(receipt),
        },
        RuleScore {
            rule: "round dollar total",
            points: round_dollar_total(receipt),
        },
        RuleScore {
            rule: "total is a multiple of 25 cents",
            points: quarter_multiple_total(receipt),
        },
        RuleScore {
            rule: "five points per pair of items",
            points: item_pairs(receipt),
        },
        RuleScore {
            rule: "description length multiple of three",
            points: description_lengths(receipt),
        },
        RuleScore {
            rule: "odd purchase day",
            points: odd_purchase_day(receipt),
        },
        RuleScore {
            rule: "afternoon purchase window",
            points: afternoon_purchase(receipt),
        },
    ]
}

fn retailer_alphanumeric(receipt: &Receipt) -> u64 {
    receipt
        .retailer
        .as_str()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as u64
}

fn round_dollar_total(receipt: &Receipt) -> u64 {
    if receipt.total.cents() % 100 == 0 {
        50
    } else {
        0
    }
}

fn quarter_multiple_total(receipt: &Receipt) -> u64 {
    if receipt.total.cents() % 25 == 0 {
        25
    } else {
        0
    }
}

fn item_pairs(receipt: &Receipt) -> u64 {
    (receipt.items.len() as u64 / 2) * 5
}

fn description_lengths(receipt: &Receipt) -> u64 {
    receipt.items.iter().map(description_length_bonus).sum()
}

// ceil(price * 0.2) in cents arithmetic: one point per started 5 dollars.
// A description that trims to nothing still qualifies: zero is a multiple
// of three.
fn description_length_bonus(item: &Item) -> u64 {
    let trimmed = item.description.as_str().trim();
    if trimmed.chars().count() % 3 == 0 {
        item.price.cents().div_ceil(500)
    } else {
        0
    }
}

fn odd_purchase_day(receipt: &Receipt) -> u64 {
    if receipt.purchase_date.day() % 2 == 1 {
        6
    } else {
        0
    }
}

fn afternoon_purchase(receipt: &Receipt) -> u64 {
    let hour = receipt.purchase_time.hour();
    if (14..16).contains(&hour) {
        10
    } else {
        0
    }
}
