//! Number and range parsing for command arguments.

use crate::error::{CommandError, ParseNumberError};
use alloc::string::ToString;
use kernel_memory_addresses::{PageRange, VirtualAddress};

/// Parse an unsigned number.
///
/// `0x`/`0X` selects hexadecimal, any other leading `0` octal, everything
/// else decimal. The whole token must be digits of that radix.
///
/// ```
/// # use kernel_monitor::parsing::parse_number;
/// assert_eq!(parse_number("42"), Ok(42));
/// assert_eq!(parse_number("0x2A"), Ok(42));
/// assert_eq!(parse_number("052"), Ok(42));
/// assert!(parse_number("42abc").is_err());
/// ```
///
/// # Errors
/// [`ParseNumberError`] if the token is empty, has a sign, contains a digit
/// outside its radix or does not fit a `u64`.
pub fn parse_number(token: &str) -> Result<u64, ParseNumberError> {
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (hex, 16)
    } else if token.len() > 1
        && let Some(octal) = token.strip_prefix('0')
    {
        (octal, 8)
    } else {
        (token, 10)
    };

    // `from_str_radix` would accept a leading '+'.
    if digits.starts_with('+') {
        return Err(ParseNumberError(token.to_string()));
    }
    u64::from_str_radix(digits, radix).map_err(|_| ParseNumberError(token.to_string()))
}

/// Parse `START [END]` into a validated page range; `END` defaults to one
/// page past `START`.
///
/// # Errors
/// [`CommandError::InvalidAddress`] if either bound does not parse, is not
/// page aligned, or `START >= END`.
pub fn parse_page_range(start: &str, end: Option<&str>) -> Result<PageRange, CommandError> {
    let start = VirtualAddress::new(parse_number(start)?);
    let range = match end {
        Some(end) => PageRange::new(start, VirtualAddress::new(parse_number(end)?))?,
        None => PageRange::single(start)?,
    };
    Ok(range)
}
