//! Defines the date token accepted in the `Authorization` header.

use time::{
    Date, error::ParseFromDescription, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// Token format, e.g. "January 02, 2006".
///
/// The month name is matched ignoring case, the day must have two digits and
/// the year four.
pub(crate) const TOKEN_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[month repr:long case_sensitive:false] [day padding:zero], [year repr:full]"
);

/// Parse `token` as a date in [TOKEN_FORMAT].
///
/// Any real date is accepted, whether it is in the past or the future.
///
/// # Errors
///
/// Returns a [time::error::Parse] if `token` is not a date in [TOKEN_FORMAT],
/// has trailing characters or has a sign before the year.
pub fn parse_token(token: &str) -> Result<Date, time::error::Parse> {
    // The year component also accepts a leading `+` or `-`.
    let year_is_unsigned = token
        .rsplit_once(", ")
        .is_some_and(|(_, year)| year.starts_with(|c: char| c.is_ascii_digit()));

    if !year_is_unsigned {
        return Err(ParseFromDescription::InvalidComponent("year").into());
    }

    Date::parse(token, TOKEN_FORMAT)
}
