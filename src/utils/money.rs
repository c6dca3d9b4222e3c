/// Round a USD amount to the given number of decimal places.
pub(crate) fn round_usd(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
