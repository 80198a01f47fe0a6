use crate::domain::model::{BoatRecord, RateTable};
use crate::utils::error::PaymentError;

/// This month's charge for one boat: length times the rate for its place.
pub fn monthly_charge(boat: &BoatRecord, rates: &RateTable) -> f64 {
    boat.length as f64 * rates.rate(boat.kind())
}

/// Adds one month of charges to every boat.
pub fn apply_monthly_charges(boats: &mut [BoatRecord], rates: &RateTable) {
    for boat in boats.iter_mut() {
        let charge = monthly_charge(boat, rates);
        boat.amount_owed += charge;
        tracing::debug!(
            "Charged {} ${:.2}, now owes ${:.2}",
            boat.name,
            charge,
            boat.amount_owed
        );
    }
}

/// Deducts `amount` from the boat's balance and returns the new balance.
///
/// The sign of `amount` is not checked; callers are expected to pass a parsed,
/// non-negative figure.
pub fn accept_payment(boat: &mut BoatRecord, amount: f64) -> Result<f64, PaymentError> {
    if amount > boat.amount_owed {
        return Err(PaymentError::ExceedsOwed {
            owed: boat.amount_owed,
            amount,
        });
    }
    boat.amount_owed -= amount;
    Ok(boat.amount_owed)
}
