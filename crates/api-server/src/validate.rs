use domain::entities::{MIN_ASKING_PRICE, MIN_MARKET_VALUE};
use domain::object_id;
use domain::DomainError;

pub const MAX_SKIP: i64 = 1_000_000;
pub const MAX_LIMIT: i64 = 1_000;
pub const DEFAULT_LIMIT: i64 = 10;

fn invalid(field: &str, reason: &str) -> DomainError {
    DomainError::ValidationError(format!("{field} {reason}"))
}

/// Letters and spaces only, trimmed length 1..=50. Mirrors the person-name
/// rules applied at the HTTP boundary for players, users and team names.
pub fn name(field: &str, value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err(invalid(field, "must be between 1 and 50 characters"));
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(invalid(field, "may only contain letters and spaces"));
    }
    Ok(())
}

pub fn country(value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.len() < 4 || trimmed.len() > 56 {
        return Err(invalid("country", "must be between 4 and 56 characters"));
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(invalid("country", "may only contain letters and spaces"));
    }
    Ok(())
}

pub fn id(field: &str, value: &str) -> Result<(), DomainError> {
    if !object_id::is_valid(value) {
        return Err(invalid(field, "must be a 24 character hex id"));
    }
    Ok(())
}

pub fn age(value: i32) -> Result<(), DomainError> {
    if !(domain::entities::MIN_AGE..=domain::entities::MAX_AGE).contains(&value) {
        return Err(invalid("age", "must be between 18 and 40"));
    }
    Ok(())
}

pub fn market_value(value: i64) -> Result<(), DomainError> {
    if value < MIN_MARKET_VALUE {
        return Err(invalid("marketValue", "is below the minimum"));
    }
    Ok(())
}

pub fn asking_price(value: i64) -> Result<(), DomainError> {
    if value < MIN_ASKING_PRICE {
        return Err(invalid("askingPrice", "is below the minimum"));
    }
    Ok(())
}

pub fn balance(value: i64) -> Result<(), DomainError> {
    if value < 100_000 {
        return Err(invalid("balanceAmount", "is below the minimum"));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.len() < 2 || trimmed.len() > 50 || !trimmed.contains('@') {
        return Err(invalid("email", "must be a valid email address"));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), DomainError> {
    if value.len() < 6 {
        return Err(invalid("password", "must be at least 6 characters"));
    }
    Ok(())
}

/// Clamps paging inputs to sane bounds; a missing limit falls back to 10.
pub fn page(skip: Option<i64>, limit: Option<i64>) -> Result<(i64, i64), DomainError> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(0..=MAX_SKIP).contains(&skip) {
        return Err(invalid("skip", "is out of range"));
    }
    if !(0..=MAX_LIMIT).contains(&limit) {
        return Err(invalid("limit", "is out of range"));
    }
    Ok((skip, limit))
}
