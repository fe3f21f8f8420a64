use crate::{path::Path, sql::Dialect};
use std::fmt::Write as _;

///
/// Step
///
/// Scalar access step; filters are split off before rendering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

///
/// Base
///
/// What an access chain hangs off: a table column or a lateral element.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Base {
    Column(String),
    Lateral(String),
}

/// Column alias derived from the path text: `.`, `[` and `]` become `_`,
/// `=` becomes `_eq_`, quotes and backslashes are dropped.
#[must_use]
pub fn column_alias(path: &Path) -> String {
    let text = path.to_string();
    let mut alias = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '.' | '[' | ']' => alias.push('_'),
            '=' => alias.push_str("_eq_"),
            '"' | '\\' => {}
            c => alias.push(c),
        }
    }

    alias
}

pub(super) fn quote_ident(dialect: Dialect, name: &str) -> String {
    match dialect {
        Dialect::SqlServer => format!("[{}]", name.replace(']', "]]")),
        _ => format!("\"{}\"", name.replace('"', "\"\"")),
    }
}

pub(super) fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Render `steps` off `base`. `terminal` marks the selected value, which is
/// extracted as text; non-terminal chains stay JSON for a lateral source.
pub(super) fn access(dialect: Dialect, base: &Base, steps: &[Step<'_>], terminal: bool) -> String {
    match dialect {
        Dialect::PostgreSql => postgres_access(base, steps, terminal),
        Dialect::Snowflake => snowflake_access(base, steps, terminal),
        Dialect::SqlServer | Dialect::Oracle => match base {
            Base::Column(column) => json_value(dialect, column, steps),
            // laterals are never planned for these dialects
            Base::Lateral(alias) => alias.clone(),
        },
    }
}

fn postgres_access(base: &Base, steps: &[Step<'_>], terminal: bool) -> String {
    let mut out = match base {
        Base::Column(column) => quote_ident(Dialect::PostgreSql, column),
        Base::Lateral(alias) => format!("{alias}.element_value"),
    };

    if steps.is_empty() {
        if terminal && matches!(base, Base::Lateral(_)) {
            out.push_str("#>>'{}'");
        }
        return out;
    }

    let last = steps.len() - 1;
    for (i, step) in steps.iter().enumerate() {
        let op = if terminal && i == last { "->>" } else { "->" };
        match step {
            Step::Key(name) => {
                let _ = write!(out, "{op}{}", quote_literal(name));
            }
            Step::Index(index) => {
                let _ = write!(out, "{op}{index}");
            }
        }
    }

    out
}

fn snowflake_access(base: &Base, steps: &[Step<'_>], terminal: bool) -> String {
    let mut out = match base {
        Base::Column(column) if steps.is_empty() && terminal => {
            return quote_ident(Dialect::Snowflake, column);
        }
        Base::Column(column) => format!(
            "parse_json({}::variant)",
            quote_ident(Dialect::Snowflake, column)
        ),
        Base::Lateral(alias) => format!("{alias}.value"),
    };

    let mut keyed = false;
    for step in steps {
        match step {
            Step::Key(name) => {
                let sep = if keyed { '.' } else { ':' };
                let _ = write!(out, "{sep}{}", quote_ident(Dialect::Snowflake, name));
                keyed = true;
            }
            Step::Index(index) => {
                let _ = write!(out, "[{index}]");
            }
        }
    }

    if terminal {
        out.push_str("::VARCHAR");
    }

    out
}

/// `JSON_VALUE(col, '$.a.b[N]')` for SQL Server and Oracle.
pub(super) fn json_value(dialect: Dialect, column: &str, steps: &[Step<'_>]) -> String {
    let mut json_path = String::from("$");
    for step in steps {
        match step {
            Step::Key(name) if is_plain_member(name) => {
                let _ = write!(json_path, ".{name}");
            }
            Step::Key(name) => {
                let _ = write!(json_path, ".\"{}\"", name.replace('"', "\\\""));
            }
            Step::Index(index) => {
                let _ = write!(json_path, "[{index}]");
            }
        }
    }

    format!(
        "JSON_VALUE({}, {})",
        quote_ident(dialect, column),
        quote_literal(&json_path)
    )
}

fn is_plain_member(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(super) fn lateral_source(dialect: Dialect, alias: &str, array: &str) -> String {
    match dialect {
        Dialect::Snowflake => format!("LATERAL FLATTEN(input => {array}) AS {alias}"),
        _ => format!("LATERAL jsonb_array_elements({array}) AS {alias}(element_value)"),
    }
}

pub(super) fn filter_condition(dialect: Dialect, alias: &str, field: &str, value: &str) -> String {
    match dialect {
        Dialect::Snowflake => format!(
            "{alias}.value:{}::VARCHAR = {}",
            quote_ident(Dialect::Snowflake, field),
            quote_literal(value)
        ),
        _ => format!(
            "{alias}.element_value->>{} = {}",
            quote_literal(field),
            quote_literal(value)
        ),
    }
}
