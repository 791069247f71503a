use serde::ser::Error as _;

/// Encode the running water total as a JSON number.
///
/// Non-finite totals are refused; JSON has no representation for them.
pub fn encode_total(total: f64) -> Result<Vec<u8>, serde_json::Error> {
    if !total.is_finite() {
        return Err(serde_json::Error::custom(format!("water total {} is not finite", total)));
    }
    serde_json::to_vec(&total)
}

/// Decode the water total slot
pub fn decode_total(bytes: &[u8]) -> Result<f64, serde_json::Error> {
    serde_json::from_slice(bytes)
}
