use super::*;
use crate::{
    obs::{
        ComposeKind, MetricsEvent, MetricsSink, ScopeKind, metrics_report, metrics_reset,
        with_metrics_sink,
    },
    sql::{ComposeError, Projection, count_placeholders},
    types::AccountKey,
};
use proptest::prelude::*;
use std::{cell::RefCell, rc::Rc};

const JOIN: &str = r#"SELECT * FROM "cached_users" LEFT JOIN "cached_relationships" ON "#;
const ACCOUNT_ARG: &str = r#""cached_relationships"."account_id" = ?"#;

fn local() -> AccountKey {
    AccountKey::local("12345").expect("local key")
}

fn federated() -> AccountKey {
    AccountKey::federated("alice", "example.com").expect("federated key")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn local_account_excludes_federated_users() {
    let composed =
        with_relationship(&Projection::All, None, &[], None, &local()).expect("compose");
    let sql = composed.sql();

    assert!(sql.starts_with(JOIN));
    assert!(sql.contains(r#""cached_relationships"."user_id" = "cached_users"."user_id""#));
    assert!(sql.contains(ACCOUNT_ARG));
    assert!(sql.contains(r#""cached_users"."user_id" = ?"#));
    assert!(sql.contains(r#""cached_users"."user_id" NOT LIKE '%@%'"#));
    assert!(!sql.contains("ORDER BY"));
    assert!(!sql.contains("LIMIT"));
    assert_eq!(composed.args().to_vec(), strings(&["12345", "12345"]));
}

#[test]
fn federated_account_matches_its_host() {
    let composed =
        with_relationship(&Projection::All, None, &[], None, &federated()).expect("compose");
    let sql = composed.sql();

    assert!(sql.starts_with(JOIN));
    assert!(sql.contains(r#""cached_users"."user_id" LIKE '%@' || ?"#));
    assert!(!sql.contains("NOT LIKE"));
    assert_eq!(
        composed.args().to_vec(),
        strings(&["alice@example.com", "alice@example.com", "example.com"])
    );
}

#[test]
fn filter_is_anded_after_user_scope_and_args_follow() {
    let projection = Projection::columns(["name", "screen_name"]);
    let composed = with_relationship(
        &projection,
        Some("cached_users.name LIKE ? OR cached_users.screen_name LIKE ?"),
        &strings(&["a%", "b%"]),
        Some("cached_users.name ASC"),
        &federated(),
    )
    .expect("compose");
    let sql = composed.sql();

    assert!(sql.starts_with(r#"SELECT name, screen_name FROM "cached_users" LEFT JOIN "#));
    let scope_at = sql.find("LIKE '%@' || ?").expect("scope predicate");
    let filter_at = sql
        .find("(cached_users.name LIKE ? OR cached_users.screen_name LIKE ?\n)")
        .expect("filter fragment");
    assert!(scope_at < filter_at);
    assert!(sql.ends_with("ORDER BY cached_users.name ASC"));
    assert_eq!(
        composed.args().to_vec(),
        strings(&[
            "alice@example.com",
            "alice@example.com",
            "example.com",
            "a%",
            "b%"
        ])
    );
}

#[test]
fn relationship_filter_args_without_filter_are_rejected() {
    let err = with_relationship(&Projection::All, None, &strings(&["x"]), None, &local())
        .expect_err("orphan args");

    assert_eq!(
        err,
        ComposeError::ArgumentCountMismatch {
            placeholders: 0,
            args: 1
        }
    );
}

#[test]
fn relationship_filter_with_too_few_args_is_rejected() {
    let err = with_relationship(
        &Projection::All,
        Some("name = ? AND screen_name = ?"),
        &strings(&["x"]),
        None,
        &local(),
    )
    .expect_err("short args");

    assert_eq!(
        err,
        ComposeError::ArgumentCountMismatch {
            placeholders: 2,
            args: 1
        }
    );
}

#[test]
fn score_query_wraps_relationship_query() {
    let composed =
        with_score(&Projection::All, None, &[], None, &local(), 0).expect("compose");
    let sql = composed.sql();

    assert!(sql.starts_with(r#"SELECT * FROM (SELECT "cached_users"."_id" AS "_id", "#));
    assert!(sql.contains(
        r#""cached_users"."user_id" AS "user_id", "cached_users"."created_at", "#
    ));
    assert!(sql.contains(r#"AS "score" FROM "cached_users" LEFT JOIN "#));
    assert!(sql.ends_with(r#") AS "scored""#));
    assert!(!sql.contains("LIMIT"));
    assert_eq!(composed.args().to_vec(), strings(&["12345", "12345"]));
}

#[test]
fn score_query_applies_outer_filter_order_and_limit() {
    let composed = with_score(
        &Projection::columns(["user_id", "score"]),
        Some("score > ?"),
        &strings(&["0"]),
        Some("score DESC"),
        &federated(),
        20,
    )
    .expect("compose");
    let sql = composed.sql();

    assert!(sql.starts_with("SELECT user_id, score FROM (SELECT "));
    assert!(sql.contains(r#") AS "scored" WHERE "#));
    assert!(sql.contains("(score > ?\n)"));
    assert!(sql.ends_with("ORDER BY score DESC LIMIT ?"));
    assert_eq!(
        composed.args().to_vec(),
        strings(&[
            "alice@example.com",
            "alice@example.com",
            "example.com",
            "0",
            "20"
        ])
    );
}

#[test]
fn score_weights_never_bind_arguments() {
    let weights = ScoreWeights {
        following: 10,
        notifications_enabled: 0,
        followed_by: 0,
        blocking: -1,
        blocked_by: 0,
        muting: 0,
    };
    let composed =
        with_score_weighted(&Projection::All, None, &[], None, &local(), 0, &weights)
            .expect("compose");

    assert_eq!(composed.args().len(), 2);
    assert!(composed.sql().contains("CASE WHEN"));
    assert!(composed.sql().contains(r#""cached_relationships"."muting""#));
}

#[test]
fn score_weights_default_and_evaluation() {
    let weights = ScoreWeights::default();
    assert_eq!(weights.following, 100);
    assert_eq!(weights.muting, -100);

    let following_only = RelationshipFlags {
        following: Some(true),
        notifications_enabled: None,
        followed_by: Some(false),
        blocking: Some(false),
        blocked_by: Some(false),
        muting: Some(false),
    };
    assert_eq!(weights.score(&following_only), 100);
    assert_eq!(weights.score(&RelationshipFlags::default()), 0);

    let everything = RelationshipFlags {
        following: Some(true),
        notifications_enabled: Some(true),
        followed_by: Some(true),
        blocking: Some(true),
        blocked_by: Some(true),
        muting: Some(true),
    };
    assert_eq!(weights.score(&everything), -100);
}

#[test]
fn schema_ddl_covers_both_tables() {
    let ddl = schema::create_tables_sql();

    assert!(ddl.contains("CREATE TABLE IF NOT EXISTS cached_users (_id INTEGER PRIMARY KEY"));
    assert!(ddl.contains("CREATE TABLE IF NOT EXISTS cached_relationships ("));
    assert!(ddl.contains("UNIQUE (account_id, user_id)"));
    assert_eq!(count_placeholders(&ddl), 0);
}

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn composition_records_metrics_events() {
    let capture = Rc::new(CapturingSink::default());

    with_metrics_sink(capture.clone(), || {
        with_score(&Projection::All, None, &[], None, &federated(), 5).expect("compose");
        let _ = with_relationship(&Projection::All, None, &strings(&["x"]), None, &local());
    });

    assert_eq!(
        *capture.events.borrow(),
        vec![
            MetricsEvent::Composed {
                kind: ComposeKind::Score,
                scope: ScopeKind::Federated,
                args: 4,
                limited: true,
            },
            MetricsEvent::ArgumentMismatch {
                kind: ComposeKind::Relationship,
                placeholders: 0,
                args: 1,
            },
        ]
    );
}

#[test]
fn composition_updates_global_counters() {
    metrics_reset();

    with_relationship(&Projection::All, None, &[], None, &local()).expect("compose");
    with_relationship(&Projection::All, None, &[], None, &federated()).expect("compose");

    let counters = metrics_report().counters;
    assert_eq!(counters.relationship_calls, 2);
    assert_eq!(counters.local_scope, 1);
    assert_eq!(counters.federated_scope, 1);
    assert_eq!(counters.args_bound, 5);
}

proptest! {
    #[test]
    fn args_always_match_placeholders(
        federated_host in proptest::option::of("[a-z]{1,8}\\.org"),
        filter_arity in 0usize..4,
        has_filter in any::<bool>(),
        limit in 0u32..3,
        score in any::<bool>(),
    ) {
        let account = match federated_host {
            Some(host) => AccountKey::federated("me", host),
            None => AccountKey::local("me"),
        }
        .unwrap();
        let (filter, filter_args) = if has_filter {
            let sql = vec!["name = ?"; filter_arity].join(" OR ");
            let sql = if sql.is_empty() { "1".to_string() } else { sql };
            let args = (0..filter_arity).map(|i| format!("n{i}")).collect();
            (Some(sql), args)
        } else {
            (None, Vec::new())
        };

        let composed = if score {
            with_score(&Projection::All, filter.as_deref(), &filter_args, None, &account, limit)
        } else {
            with_relationship(&Projection::All, filter.as_deref(), &filter_args, None, &account)
        }
        .unwrap();

        let scope_args = if account.host().is_some() { 3 } else { 2 };
        let limit_args = usize::from(score && limit > 0);
        let filter_end = scope_args + filter_args.len();

        prop_assert_eq!(count_placeholders(composed.sql()), composed.args().len());
        prop_assert_eq!(composed.args().len(), filter_end + limit_args);
        prop_assert_eq!(&composed.args()[scope_args..filter_end], filter_args.as_slice());
    }
}
