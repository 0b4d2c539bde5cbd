//! Filtered `SELECT` construction.
//!
//! Predicates are accumulated as typed values and only turned into SQL by
//! [`SelectQuery::render`]. The `$n` placeholder of a predicate is its
//! position in the list, so the rendered clauses and the bind values can never
//! drift apart.

use std::fmt;

use crate::sql::value::SqlValue;

/// Comparison operator of a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Gt,
    Gte,
    Lte,
    /// Case-insensitive `LIKE`.
    ILike,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::ILike => "ILIKE",
        };
        f.write_str(op)
    }
}

/// `<column> <op> <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: Op,
    pub value: SqlValue,
}

impl Predicate {
    pub fn new(column: &'static str, op: Op, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    pub fn gt(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Op::Gt, value)
    }

    pub fn gte(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Op::Gte, value)
    }

    pub fn lte(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Op::Lte, value)
    }

    /// Case-insensitive substring match. `%`, `_` and `\` in `needle` are
    /// matched literally.
    pub fn contains(column: &'static str, needle: &str) -> Self {
        Self::new(column, Op::ILike, format!("%{}%", escape_like(needle)))
    }

    fn render(&self, placeholder: usize) -> String {
        format!("{} {} ${}", self.column, self.op, placeholder)
    }
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A base `SELECT` plus optional `AND`-joined predicates and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    base: String,
    predicates: Vec<Predicate>,
    order_by: Option<&'static str>,
}

impl SelectQuery {
    /// `base` is a complete `SELECT ... FROM ...` without `WHERE`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            predicates: Vec::new(),
            order_by: None,
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filter_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(p) => self.filter(p),
            None => self,
        }
    }

    pub fn order_by(mut self, column: &'static str) -> Self {
        self.order_by = Some(column);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The SQL text. Placeholders run `$1..$n` in predicate order.
    pub fn render(&self) -> String {
        let mut sql = self.base.clone();
        if !self.predicates.is_empty() {
            let clauses: Vec<String> = self
                .predicates
                .iter()
                .enumerate()
                .map(|(idx, p)| p.render(idx + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        if let Some(column) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(column);
        }
        sql
    }

    /// Rendered SQL and the bind values in placeholder order.
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        let sql = self.render();
        let values = self.predicates.into_iter().map(|p| p.value).collect();
        (sql, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const BASE: &str = "SELECT id, title FROM jobs";

    #[test]
    fn no_predicates_means_no_where() {
        let (sql, values) = SelectQuery::new(BASE).order_by("title").into_parts();
        assert_eq!(sql, "SELECT id, title FROM jobs ORDER BY title");
        assert!(values.is_empty());
    }

    #[test]
    fn predicates_are_and_joined_and_numbered_in_order() {
        let (sql, values) = SelectQuery::new(BASE)
            .filter(Predicate::contains("title", "eng"))
            .filter(Predicate::gte("salary", 50_000))
            .filter(Predicate::gt("equity", Decimal::ZERO))
            .order_by("title")
            .into_parts();

        assert_eq!(
            sql,
            "SELECT id, title FROM jobs WHERE title ILIKE $1 AND salary >= $2 AND equity > $3 ORDER BY title"
        );
        assert_eq!(
            values,
            vec![
                SqlValue::from("%eng%"),
                SqlValue::from(50_000),
                SqlValue::from(Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn order_by_is_separated_from_the_last_predicate() {
        let sql = SelectQuery::new(BASE)
            .filter(Predicate::lte("salary", 10))
            .order_by("title")
            .render();
        assert!(sql.ends_with("salary <= $1 ORDER BY title"));
    }

    #[test]
    fn filter_opt_skips_none() {
        let query = SelectQuery::new(BASE)
            .filter_opt(None)
            .filter_opt(Some(Predicate::gte("salary", 1)));
        assert_eq!(query.predicates().len(), 1);
        assert_eq!(query.render(), "SELECT id, title FROM jobs WHERE salary >= $1");
    }

    #[test]
    fn like_wildcards_in_needle_are_escaped() {
        let p = Predicate::contains("name", "50%_off\\");
        assert_eq!(p.value, SqlValue::from(r"%50\%\_off\\%"));
    }
}
