//! Helpers for building parameterized SQL text.
//!
//! Values never appear in the generated text; they travel alongside it and
//! are bound to `$n` placeholders by the executor.

use jobly_core::{DomainError, DomainResult};

/// A `SET` clause body plus the values its placeholders refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFragment<V> {
    /// e.g. `"first_name"=$1, "age"=$2`
    pub sql: String,
    /// `values[i]` binds to placeholder `$(first + i)`.
    pub values: Vec<V>,
    first: usize,
}

impl<V> SetFragment<V> {
    /// Index of the first placeholder not used by this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.first + self.values.len()
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

/// Build the `SET` fragment for a partial update, numbering from `$1`.
///
/// Each key is translated through `name_map` (application name → column);
/// keys without an entry are used verbatim as the column name. Keys are
/// emitted as quoted identifiers but are otherwise trusted, so callers must
/// only pass field names from a fixed set.
pub fn build_set_fragment<K, V, I>(fields: I, name_map: &[(&str, &str)]) -> DomainResult<SetFragment<V>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    build_set_fragment_from(fields, name_map, 1)
}

/// Same as [`build_set_fragment`], numbering placeholders from `first`.
pub fn build_set_fragment_from<K, V, I>(
    fields: I,
    name_map: &[(&str, &str)],
    first: usize,
) -> DomainResult<SetFragment<V>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for (idx, (key, value)) in fields.into_iter().enumerate() {
        let key = key.as_ref();
        let column = name_map
            .iter()
            .find_map(|(from, to)| (*from == key).then_some(*to))
            .unwrap_or(key);
        columns.push(format!("{}=${}", quote_ident(column), first + idx));
        values.push(value);
    }

    if values.is_empty() {
        return Err(DomainError::EmptyUpdate);
    }

    Ok(SetFragment {
        sql: columns.join(", "),
        values,
        first,
    })
}

/// Quote an identifier, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Escape `LIKE`/`ILIKE` metacharacters so `needle` matches literally
/// (backslash is Postgres' default escape character).
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
