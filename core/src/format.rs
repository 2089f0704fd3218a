use crate::types::Rupees;

/// Short rupee amount using Indian units: ₹1.14Cr, ₹5.00L, ₹15.3K, ₹750.
pub fn format_inr(amount: Rupees) -> String {
    if amount >= 10_000_000.0 {
        format!("₹{:.2}Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2}L", amount / 100_000.0)
    } else if amount >= 1_000.0 {
        format!("₹{:.1}K", amount / 1_000.0)
    } else {
        format!("₹{}", amount.round())
    }
}
