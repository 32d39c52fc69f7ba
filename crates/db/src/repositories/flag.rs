//! Boolean columns are stored as the literals `SIM` and `NAO`.

use super::RepositoryError;

pub const TRUE_LITERAL: &str = "SIM";
pub const FALSE_LITERAL: &str = "NAO";

pub fn flag_as_str(value: bool) -> &'static str {
    if value {
        TRUE_LITERAL
    } else {
        FALSE_LITERAL
    }
}

pub fn parse_flag(column: &str, value: &str) -> Result<bool, RepositoryError> {
    match value {
        TRUE_LITERAL => Ok(true),
        FALSE_LITERAL => Ok(false),
        other => Err(RepositoryError::Decode(format!(
            "{column} holds `{other}`, expected `{TRUE_LITERAL}` or `{FALSE_LITERAL}`"
        ))),
    }
}
