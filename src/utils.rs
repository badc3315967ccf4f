//! Record identifiers and user input helpers

use bech32::Bech32m;
use uuid7::uuid7;

pub const DELIVERY_HRP: &str = "delivery_";
pub const ITEM_HRP: &str = "item_";

/// Generate a fresh record id: a uuid7 encoded as bech32m under `hrp`.
pub fn new_record_id(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let id = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(id)
}

/// Read an integer from text typed into a quantity field.
///
/// Leading whitespace and an optional sign are accepted, then as many decimal
/// digits as are present. Anything after the digits is ignored, so `"7kg"`
/// reads as 7 and `"3.9"` as 3. Text with no leading digits reads as 0.
/// Values beyond the `i64` range saturate.
pub fn parse_quantity(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}
