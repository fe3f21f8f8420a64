//! SELECT generation for the visible column list.
//!
//! Each column path becomes one select expression. Filter segments expand
//! the filtered array row-wise through a lateral join where the dialect
//! supports it; SQL Server and Oracle fall back to the first element.

mod expr;


use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::sink::{self, MetricsEvent},
    path::{Path, Segment},
};
use expr::{Base, Step};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Write as _, str::FromStr};
use thiserror::Error as ThisError;

// re-exports
pub use expr::column_alias;

///
/// SqlError
///
/// Per-column generation failure. Rendered as a comment line; the rest of
/// the statement is still emitted.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SqlError {
    #[error("path '{path}' starts with an array index and has no root column")]
    RootIndex { path: String },

    #[error("path '{path}' starts with a filter and has no root column")]
    RootFilter { path: String },

    #[error("unknown SQL dialect '{name}'")]
    UnknownDialect { name: String },
}

///
/// Dialect
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Snowflake,
    #[default]
    PostgreSql,
    SqlServer,
    Oracle,
}

impl Dialect {
    pub const ALL: [Self; 4] = [
        Self::Snowflake,
        Self::PostgreSql,
        Self::SqlServer,
        Self::Oracle,
    ];

    /// Stable lowercase tag, as accepted by [`FromStr`] and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snowflake => "snowflake",
            Self::PostgreSql => "postgresql",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Snowflake => "Snowflake",
            Self::PostgreSql => "PostgreSQL",
            Self::SqlServer => "SQL Server",
            Self::Oracle => "Oracle",
        }
    }

    /// Whether filter segments can be expanded with a lateral join.
    #[must_use]
    pub const fn supports_lateral(self) -> bool {
        matches!(self, Self::Snowflake | Self::PostgreSql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|dialect| dialect.as_str() == name)
            .ok_or(SqlError::UnknownDialect { name })
    }
}

///
/// SqlOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlOptions {
    /// Table named in the FROM clause, emitted verbatim.
    pub table: String,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            table: "my_table".to_string(),
        }
    }
}

///
/// Lateral
///
/// One row-wise array expansion, shared by every column whose path runs
/// through the same filtered array prefix.
///

struct Lateral {
    through: Path,
    alias: String,
    source: String,
    condition: String,
}

///
/// Plan
///

#[derive(Default)]
struct Plan {
    select: Vec<String>,
    laterals: Vec<Lateral>,
    skipped: Vec<String>,
    degraded: u64,
}

/// Generate a SELECT statement with default options.
#[must_use]
pub fn generate_sql(columns: &[Path], dialect: Dialect) -> String {
    generate_sql_with(columns, dialect, &SqlOptions::default())
}

/// Generate a SELECT statement for `columns` in display order.
///
/// Never fails: a column that cannot be expressed becomes a `-- skipped`
/// comment, and a failure assembling the statement yields a comment
/// describing it.
#[must_use]
pub fn generate_sql_with(columns: &[Path], dialect: Dialect, options: &SqlOptions) -> String {
    let plan = plan(columns, dialect);

    sink::record(MetricsEvent::SqlGenerated {
        dialect,
        columns: plan.select.len() as u64,
        laterals: plan.laterals.len() as u64,
        skipped: plan.skipped.len() as u64,
        degraded: plan.degraded,
    });

    match render(&plan, dialect, options) {
        Ok(sql) => sql,
        Err(err) => {
            tracing::warn!(error = %err, "sql: statement rendering failed");
            format!("-- SQL generation failed: {}\n", err.display_with_class())
        }
    }
}

fn plan(columns: &[Path], dialect: Dialect) -> Plan {
    let mut plan = Plan::default();

    for path in columns {
        match column_expression(path, dialect, &mut plan) {
            Ok(expression) => {
                let alias = expr::quote_ident(dialect, &column_alias(path));
                plan.select.push(format!("{expression} AS {alias}"));
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "sql: column skipped");
                plan.skipped.push(format!("-- skipped {path}: {err}"));
            }
        }
    }

    if plan.degraded > 0 {
        tracing::warn!(
            dialect = %dialect,
            columns = plan.degraded,
            "sql: filter segments degraded to first element"
        );
    }

    plan
}

fn column_expression(path: &Path, dialect: Dialect, plan: &mut Plan) -> Result<String, SqlError> {
    let (root, rest) = match path.segments() {
        [Segment::Key(root), rest @ ..] => (root, rest),
        [Segment::Index(_), ..] => {
            return Err(SqlError::RootIndex {
                path: path.to_string(),
            });
        }
        _ => {
            return Err(SqlError::RootFilter {
                path: path.to_string(),
            });
        }
    };

    if rest.is_empty() {
        return Ok(expr::quote_ident(dialect, root));
    }

    if !dialect.supports_lateral() {
        if path.has_filter() {
            plan.degraded += 1;
        }
        let steps: Vec<Step<'_>> = rest
            .iter()
            .map(|segment| match segment {
                Segment::Key(name) => Step::Key(name),
                Segment::Index(index) => Step::Index(*index),
                Segment::Filter { .. } => Step::Index(0),
            })
            .collect();

        return Ok(expr::json_value(dialect, root, &steps));
    }

    let mut base = Base::Column(root.clone());
    let mut pending: Vec<Step<'_>> = Vec::new();

    for (i, segment) in rest.iter().enumerate() {
        match segment {
            Segment::Key(name) => pending.push(Step::Key(name)),
            Segment::Index(index) => pending.push(Step::Index(*index)),
            Segment::Filter { field, value } => {
                // root segment plus rest[..=i]
                let through = path.prefix(i + 2).unwrap_or_else(|| path.clone());
                let alias = lateral_alias(plan, dialect, through, &base, &pending, field, value);

                base = Base::Lateral(alias);
                pending.clear();
            }
        }
    }

    Ok(expr::access(dialect, &base, &pending, true))
}

fn lateral_alias(
    plan: &mut Plan,
    dialect: Dialect,
    through: Path,
    base: &Base,
    pending: &[Step<'_>],
    field: &str,
    value: &str,
) -> String {
    if let Some(existing) = plan.laterals.iter().find(|l| l.through == through) {
        return existing.alias.clone();
    }

    let alias = format!("f{}", plan.laterals.len());
    let source = expr::lateral_source(dialect, &alias, &expr::access(dialect, base, pending, false));
    let condition = expr::filter_condition(dialect, &alias, field, value);

    plan.laterals.push(Lateral {
        through,
        alias: alias.clone(),
        source,
        condition,
    });

    alias
}

fn render(plan: &Plan, dialect: Dialect, options: &SqlOptions) -> Result<String, InternalError> {
    write_statement(plan, dialect, options).map_err(|_| {
        InternalError::new(
            ErrorClass::Internal,
            ErrorOrigin::Sql,
            "failed to format statement",
        )
    })
}

fn write_statement(plan: &Plan, dialect: Dialect, options: &SqlOptions) -> Result<String, fmt::Error> {
    let mut sql = String::new();

    if plan.degraded > 0 {
        writeln!(
            sql,
            "-- NOTE: {} cannot filter arrays inside JSON_VALUE; filter segments read the first element ([0])",
            dialect.display_name()
        )?;
    }
    for line in &plan.skipped {
        writeln!(sql, "{line}")?;
    }

    if plan.select.is_empty() {
        writeln!(sql, "SELECT *")?;
    } else {
        writeln!(sql, "SELECT")?;
        let last = plan.select.len() - 1;
        for (i, expression) in plan.select.iter().enumerate() {
            let separator = if i == last { "" } else { "," };
            writeln!(sql, "    {expression}{separator}")?;
        }
    }

    write!(sql, "FROM {}", options.table)?;
    for lateral in &plan.laterals {
        write!(sql, ",\n    {}", lateral.source)?;
    }

    for (i, lateral) in plan.laterals.iter().enumerate() {
        let keyword = if i == 0 { "\nWHERE" } else { "\n    AND" };
        write!(sql, "{keyword} {}", lateral.condition)?;
    }
    sql.push_str(";\n");

    Ok(sql)
}
