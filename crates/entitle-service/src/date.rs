use jiff::Zoned;
use jiff::civil::Date;

use crate::error::{ServiceError, ServiceResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an `on_date` argument. An empty string means "no date filter"; a
/// date strictly earlier than today is rejected as invalid input.
pub fn parse_on_date(input: &str) -> ServiceResult<Option<Date>> {
    parse_on_date_from(input, Zoned::now().date())
}

fn parse_on_date_from(input: &str, today: Date) -> ServiceResult<Option<Date>> {
    if input.is_empty() {
        return Ok(None);
    }
    let date = Date::strptime(DATE_FORMAT, input)
        .map_err(|_| ServiceError::InvalidDate(input.to_owned()))?;
    if date < today {
        return Err(ServiceError::PastDate);
    }
    Ok(Some(date))
}
