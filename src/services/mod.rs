use sea_orm::{
    ColumnTrait,
    sea_query::{Alias, Expr, Func, LikeExpr, SimpleExpr},
};

pub mod auth_service;
pub mod inventory_service;
pub mod lookup_service;
pub mod product_service;
pub mod sale_service;
pub mod summary_service;

const LIKE_ESCAPE: char = '\\';

/// `%needle%` with the needle's own wildcards taken literally.
fn like_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// Case-insensitive substring match that behaves the same on Postgres and SQLite.
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let column = Expr::col((C::EntityName::default(), column));
    Expr::expr(Func::lower(column)).like(like_pattern(&needle.to_lowercase()))
}

/// Substring match over a non-text column (ids, dates) rendered as text.
pub(crate) fn contains_as_text<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let column = Expr::col((C::EntityName::default(), column));
    Expr::expr(Func::cast_as(column, Alias::new("text"))).like(like_pattern(needle))
}

/// Trimmed, non-empty search term.
pub(crate) fn search_term(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use crate::entity::{Sales, sales};

    #[test]
    fn wildcards_in_the_needle_are_escaped() {
        let sql = Sales::find()
            .filter(contains_as_text(sales::Column::SaleDate, "50%_off"))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r"%50\%\_off%"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(sql.contains("CAST("), "{sql}");
    }
}
