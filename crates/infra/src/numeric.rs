//! Exact decimal text ⇄ Postgres `numeric`.
//!
//! Parameters are bound as `BigDecimal` parsed from the caller's text, which
//! keeps the written scale. Results are read back through `numeric::text`:
//! Postgres prints numerics in plain notation at the stored display scale,
//! whereas decoding into `BigDecimal` loses that scale.

use std::str::FromStr;

use sqlx::types::BigDecimal;

use crate::error::StoreError;

/// Parse decimal text into a bind parameter without changing its scale.
pub fn numeric_param(text: &str) -> Result<BigDecimal, StoreError> {
    BigDecimal::from_str(text).map_err(|e| StoreError::Encode(format!("numeric parameter '{text}': {e}")))
}
