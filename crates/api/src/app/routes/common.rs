use core::str::FromStr;

use crm_core::DomainError;

use crate::app::errors;

/// Parse a path/body identifier, mapping failures to a 400 response.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}
