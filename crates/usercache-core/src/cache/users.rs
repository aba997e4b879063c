use crate::{
    cache::{
        SCORE_COLUMN, ScoreWeights,
        schema::{cached_relationships, cached_users, relationship_column, user_column},
    },
    obs::{ComposeKind, MetricsEvent, ScopeKind, sink::record},
    sql::{ComposeError, ComposedQuery, Fragment, OrderBy, Projection},
    types::{AccountKey, UserScope},
};
use sea_query::{Alias, BinOper, Condition, Expr, Query, SelectStatement};

/// Alias of the scored subquery in [`with_score`].
const SCORED_ALIAS: &str = "scored";

/// Cached users left-joined with the account's relationship rows.
///
/// Arguments come out as `[account key, user-scope args.., filter args..]`.
/// Passing `filter_args` without a `filter` is an argument mismatch.
pub fn with_relationship(
    projection: &Projection,
    filter: Option<&str>,
    filter_args: &[String],
    sort_order: Option<&str>,
    account_key: &AccountKey,
) -> Result<ComposedQuery, ComposeError> {
    let filter = checked_filter(ComposeKind::Relationship, filter, filter_args)?;

    let mut query = relationship_select(account_key, filter.as_ref());
    projection.apply(&mut query);
    if let Some(order) = sort_order {
        OrderBy::raw(order).apply(&mut query);
    }

    finish(ComposeKind::Relationship, query, account_key, None)
}

/// Cached users ranked by relationship score, using the default weights.
///
/// The relationship query becomes a subquery exposing every cached-user
/// column plus `score`; `projection`, `filter`, `sort_order` and `limit`
/// apply to the outer SELECT. A `limit` of 0 means no limit; otherwise the
/// row count is bound as the last argument.
pub fn with_score(
    projection: &Projection,
    filter: Option<&str>,
    filter_args: &[String],
    sort_order: Option<&str>,
    account_key: &AccountKey,
    limit: u32,
) -> Result<ComposedQuery, ComposeError> {
    with_score_weighted(
        projection,
        filter,
        filter_args,
        sort_order,
        account_key,
        limit,
        &ScoreWeights::default(),
    )
}

/// [`with_score`] with explicit weights.
pub fn with_score_weighted(
    projection: &Projection,
    filter: Option<&str>,
    filter_args: &[String],
    sort_order: Option<&str>,
    account_key: &AccountKey,
    limit: u32,
    weights: &ScoreWeights,
) -> Result<ComposedQuery, ComposeError> {
    let filter = checked_filter(ComposeKind::Score, filter, filter_args)?;

    let mut inner = relationship_select(account_key, None);
    select_scored_user_columns(&mut inner, weights);

    let mut outer = Query::select();
    projection.apply(&mut outer);
    outer.from_subquery(inner, Alias::new(SCORED_ALIAS));
    if let Some(filter) = &filter {
        outer.and_where(filter.to_expr());
    }
    if let Some(order) = sort_order {
        OrderBy::raw(order).apply(&mut outer);
    }
    let limit = query_limit(limit);
    if let Some(n) = limit {
        outer.limit(u64::from(n));
    }

    finish(ComposeKind::Score, outer, account_key, limit)
}

// Every cached-user column, table-qualified, plus the score. `_id` and
// `user_id` also exist on the relationship table, so they keep explicit
// aliases for the outer query.
fn select_scored_user_columns(select: &mut SelectStatement, weights: &ScoreWeights) {
    for column in cached_users::COLUMNS {
        if column.name == cached_users::ID || column.name == cached_users::USER_ID {
            select.expr_as(Expr::col(user_column(column.name)), Alias::new(column.name));
        } else {
            select.column(user_column(column.name));
        }
    }
    select.expr_as(weights.expr(), Alias::new(SCORE_COLUMN));
}

// FROM, JOIN and WHERE; projection and ordering are left to the caller.
fn relationship_select(account_key: &AccountKey, filter: Option<&Fragment>) -> SelectStatement {
    let account = account_key.to_string();

    let on = Condition::all()
        .add(
            Expr::col(relationship_column(cached_relationships::USER_ID))
                .equals(user_column(cached_users::USER_ID)),
        )
        .add(Expr::col(relationship_column(cached_relationships::ACCOUNT_ID)).eq(account.clone()));

    let mut select = Query::select();
    select
        .from(Alias::new(cached_users::TABLE_NAME))
        .left_join(Alias::new(cached_relationships::TABLE_NAME), on)
        .cond_where(
            Condition::all()
                .add(user_scope_condition(account_key.scope(), account))
                .add_option(filter.map(Fragment::to_expr)),
        );

    select
}

// The account's own key is always in scope. The second arm picks the
// addressing scheme: local ids never contain '@', federated ids end in
// '@host'. `AccountKey` construction enforces both.
fn user_scope_condition(scope: UserScope<'_>, account: String) -> Condition {
    let user_id = || Expr::col(user_column(cached_users::USER_ID));
    let own = user_id().eq(account);

    let scheme = match scope {
        UserScope::Local => {
            user_id().binary(BinOper::NotLike, Expr::cust("'%@%'"))
        }
        UserScope::Federated { host } => user_id().binary(
            BinOper::Like,
            Expr::cust_with_values("'%@' || ?", [host.to_string()]),
        ),
    };

    Condition::any().add(own).add(scheme)
}

fn checked_filter(
    kind: ComposeKind,
    filter: Option<&str>,
    filter_args: &[String],
) -> Result<Option<Fragment>, ComposeError> {
    Fragment::from_optional(filter, filter_args).inspect_err(|err| report_error(kind, err))
}

fn finish(
    kind: ComposeKind,
    query: SelectStatement,
    account_key: &AccountKey,
    limit: Option<u32>,
) -> Result<ComposedQuery, ComposeError> {
    let composed =
        ComposedQuery::from_select(query).inspect_err(|err| report_error(kind, err))?;

    let scope = match account_key.scope() {
        UserScope::Local => ScopeKind::Local,
        UserScope::Federated { .. } => ScopeKind::Federated,
    };
    let args = composed.args().len();
    record(MetricsEvent::Composed {
        kind,
        scope,
        args: args as u64,
        limited: limit.is_some(),
    });
    tracing::debug!(
        kind = ?kind,
        scope = account_key.scope().label(),
        args,
        limit = ?limit,
        "composed cached-user query"
    );

    Ok(composed)
}

const fn query_limit(limit: u32) -> Option<u32> {
    if limit > 0 { Some(limit) } else { None }
}

fn report_error(kind: ComposeKind, err: &ComposeError) {
    match err {
        ComposeError::ArgumentCountMismatch { placeholders, args } => {
            record(MetricsEvent::ArgumentMismatch {
                kind,
                placeholders: *placeholders as u64,
                args: *args as u64,
            });
            tracing::warn!(kind = ?kind, placeholders, args, "argument count mismatch");
        }
        ComposeError::UnsupportedValue(value) => {
            tracing::warn!(kind = ?kind, value = %value, "unsupported bound value");
        }
    }
}
