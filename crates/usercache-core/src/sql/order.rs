use sea_query::{Expr, Order, SelectStatement};

///
/// OrderBy
///
/// ORDER BY terms. Raw text such as `"score DESC, name"` is trusted and
/// split on top-level commas; a term without a direction sorts ascending.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderBy(Vec<OrderTerm>);

#[derive(Clone, Debug, Eq, PartialEq)]
struct OrderTerm {
    expr: String,
    descending: bool,
}

impl OrderBy {
    #[must_use]
    pub fn raw(order: &str) -> Self {
        Self(
            split_top_level(order)
                .into_iter()
                .filter_map(OrderTerm::parse)
                .collect(),
        )
    }

    #[must_use]
    pub fn asc(column: &str) -> Self {
        Self(vec![OrderTerm::new(column, false)])
    }

    #[must_use]
    pub fn desc(column: &str) -> Self {
        Self(vec![OrderTerm::new(column, true)])
    }

    /// Append another sort key.
    #[must_use]
    pub fn then(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn apply(&self, select: &mut SelectStatement) {
        for term in &self.0 {
            let order = if term.descending {
                Order::Desc
            } else {
                Order::Asc
            };
            select.order_by_expr(Expr::cust(term.expr.as_str()), order);
        }
    }
}

impl OrderTerm {
    fn new(expr: &str, descending: bool) -> Self {
        Self {
            expr: expr.to_string(),
            descending,
        }
    }

    fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let Some((head, last)) = term.rsplit_once(char::is_whitespace) else {
            return Some(Self::new(term, false));
        };
        let head = head.trim_end();
        if last.eq_ignore_ascii_case("desc") {
            Some(Self::new(head, true))
        } else if last.eq_ignore_ascii_case("asc") {
            Some(Self::new(head, false))
        } else {
            Some(Self::new(term, false))
        }
    }
}

// Commas inside parentheses or quotes belong to the term.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
}
