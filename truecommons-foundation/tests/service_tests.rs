use std::sync::Arc;
use truecommons_foundation::repository::mock::{operation_log, InMemoryRepository};
use truecommons_foundation::{
    ClassBaseline, EntityCache, FoundationError, FoundationService, InitStep,
    ReferenceRepository, RequiredBaseline, SchemaType,
};
use truecommons_types::EntityClass;

fn reference_repos() -> Vec<Arc<InMemoryRepository>> {
    EntityClass::RECONCILE_ORDER
        .iter()
        .map(|&class| Arc::new(InMemoryRepository::new(class)))
        .collect()
}

fn make_service(repos: &[Arc<InMemoryRepository>]) -> FoundationService {
    let cache = Arc::new(EntityCache::new(
        repos
            .iter()
            .map(|r| r.clone() as Arc<dyn ReferenceRepository>)
            .collect(),
    ));
    FoundationService::with_default_baseline(cache)
}

/// Seeds a repository with every record of a baseline table except `skip`.
fn seed_table(repo: &InMemoryRepository, table: &ClassBaseline, skip: &[&str]) {
    for record in &table.records {
        if !skip.contains(&record.stable_key.as_str()) {
            repo.seed(&record.stable_key, record.payload.clone());
        }
    }
}

/// Seeds the entire default baseline, as a fully provisioned backend.
fn seed_full_baseline(repos: &[Arc<InMemoryRepository>]) {
    let baseline = RequiredBaseline::default();
    for (repo, table) in repos.iter().zip(baseline.classes()) {
        seed_table(repo, table, &[]);
    }
}

// ── Full run ─────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_provisions_and_reaches_ready() {
    let repos = reference_repos();
    let service = make_service(&repos);

    service.initialize().await.unwrap();

    let status = service.status();
    assert_eq!(status.step, InitStep::Ready);
    assert_eq!(status.completed, status.total);
    assert!(status.last_error.is_none());
    assert_eq!(
        service.capabilities().unwrap().schema_type,
        SchemaType::Full
    );

    let report = service.check_readiness().await;
    assert!(report.all_ready);
    assert!(report.ready);

    assert!(repos[0].stored_keys().contains(&"hour".to_string()));
    assert!(repos[1].stored_keys().contains(&"produce".to_string()));
    assert!(repos[3].stored_keys().contains(&"General Discussion".to_string()));
}

#[tokio::test]
async fn initialize_is_a_noop_once_ready() {
    let repos = reference_repos();
    let service = make_service(&repos);
    service.initialize().await.unwrap();
    let fetches = repos[0].fetch_calls();
    let creates = repos[0].create_calls();

    service.initialize().await.unwrap();

    assert_eq!(repos[0].fetch_calls(), fetches);
    assert_eq!(repos[0].create_calls(), creates);
}

#[tokio::test]
async fn concurrent_initialize_runs_once() {
    let repos = reference_repos();
    seed_full_baseline(&repos);
    let service = make_service(&repos);

    let (a, b, c) = tokio::join!(
        service.initialize(),
        service.initialize(),
        service.initialize()
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    for repo in &repos {
        // One probe read, one reconcile refresh, one verification fetch.
        assert_eq!(repo.fetch_calls(), 3);
        // Only the probe sentinel was ever written.
        assert_eq!(repo.create_calls(), 1);
        assert_eq!(repo.delete_calls(), 1);
    }
}

#[tokio::test]
async fn units_reconcile_before_resource_specifications() {
    let repos = reference_repos();
    let log = operation_log();
    for repo in &repos {
        repo.attach_log(log.clone());
    }
    let service = make_service(&repos);

    service.initialize().await.unwrap();

    // Probe sentinel writes are not reconciliation work.
    let entries = log.lock().unwrap().clone();
    let is_baseline_create = |e: &String, class: &str| {
        e.starts_with(&format!("create {class}")) && !e.contains("capability-probe")
    };
    let first_spec_create = entries
        .iter()
        .position(|e| is_baseline_create(e, "resourceSpecification"))
        .unwrap();
    let last_unit_create = entries
        .iter()
        .rposition(|e| is_baseline_create(e, "unit"))
        .unwrap();
    let unit_fetches_before = entries[..first_spec_create]
        .iter()
        .filter(|e| e.starts_with("fetch unit"))
        .count();

    assert!(first_spec_create > last_unit_create);
    // Probe read, reconcile refresh, and the post-create refresh all
    // precede the first resource specification write.
    assert!(unit_fetches_before >= 3);
}

// ── Read-only acceptance ─────────────────────────────────────────

#[tokio::test]
async fn read_only_backend_accepted_with_partial_baseline() {
    let repos = reference_repos();
    let baseline = RequiredBaseline::default();
    seed_table(&repos[0], &baseline.units, &["kilogram"]);
    seed_table(&repos[1], &baseline.actions, &[]);
    seed_table(&repos[2], &baseline.resource_specifications, &[]);
    seed_table(&repos[3], &baseline.process_specifications, &[]);
    for repo in &repos {
        repo.set_structural_writes(true);
    }
    let service = make_service(&repos);

    service.initialize().await.unwrap();

    assert_eq!(service.status().step, InitStep::Ready);
    assert_eq!(
        service.capabilities().unwrap().schema_type,
        SchemaType::ReadOnly
    );

    let report = service.check_readiness().await;
    assert!(report.ready);
    assert!(!report.all_ready);

    let units = report.for_class(EntityClass::Unit).unwrap();
    assert!(!units.ready);
    assert_eq!(units.missing, ["kilogram"]);
    assert!(report.for_class(EntityClass::Action).unwrap().ready);
}

#[tokio::test]
async fn action_readiness_needs_only_the_core_vocabulary() {
    let repos = reference_repos();
    let baseline = RequiredBaseline::default();
    seed_table(&repos[0], &baseline.units, &[]);
    // The backend's fixed vocabulary carries the core but not the full list.
    seed_table(&repos[1], &baseline.actions, &["contribute", "fork", "remix"]);
    seed_table(&repos[2], &baseline.resource_specifications, &[]);
    seed_table(&repos[3], &baseline.process_specifications, &[]);
    for repo in &repos {
        repo.set_structural_writes(true);
    }
    let service = make_service(&repos);

    service.initialize().await.unwrap();
    let report = service.check_readiness().await;

    let actions = report.for_class(EntityClass::Action).unwrap();
    assert!(actions.ready);
    assert_eq!(actions.missing, ["contribute", "fork", "remix"]);
    assert!(report.all_ready);
}

// ── Failure modes ────────────────────────────────────────────────

#[tokio::test]
async fn structural_failure_on_writable_schema_is_fatal() {
    let repos = reference_repos();
    repos[0].set_structural_writes(true);
    let service = make_service(&repos);

    let err = service.initialize().await.unwrap_err();

    assert!(matches!(
        err,
        FoundationError::Unsupported {
            class: EntityClass::Unit,
            ..
        }
    ));
    let status = service.status();
    assert_eq!(status.step, InitStep::Failed);
    assert!(status.last_error.unwrap().contains("unit"));
}

#[tokio::test]
async fn failed_run_holds_its_error_until_reset() {
    let repos = reference_repos();
    repos[0].set_structural_writes(true);
    let service = make_service(&repos);
    service.initialize().await.unwrap_err();
    let fetches = repos[0].fetch_calls();

    // The backend is fixed, but the stored error stands until reset.
    repos[0].set_structural_writes(false);
    let err = service.initialize().await.unwrap_err();
    assert!(matches!(err, FoundationError::Unsupported { .. }));
    assert_eq!(repos[0].fetch_calls(), fetches);

    service.reset();
    assert_eq!(service.status().step, InitStep::NotStarted);
    assert!(service.capabilities().is_none());

    service.initialize().await.unwrap();
    assert_eq!(service.status().step, InitStep::Ready);
}

#[tokio::test]
async fn incomplete_baseline_on_writable_schema_errors() {
    let repos = reference_repos();
    repos[0].fail_create_for("one");
    let service = make_service(&repos);

    let err = service.initialize().await.unwrap_err();

    match &err {
        FoundationError::Incomplete(report) => {
            assert!(!report.all_ready);
            assert_eq!(
                report.for_class(EntityClass::Unit).unwrap().missing,
                ["one"]
            );
        }
        other => panic!("expected Incomplete, got {other:?}"),
    }
    assert!(err.to_string().contains("one"));
    assert_eq!(service.status().step, InitStep::Failed);
}

#[tokio::test]
async fn unreachable_backend_degrades() {
    let repos = reference_repos();
    for repo in &repos {
        repo.set_fail_reads(true);
    }
    let service = make_service(&repos);

    service.initialize().await.unwrap();

    assert_eq!(service.status().step, InitStep::Degraded);
    assert_eq!(
        service.capabilities().unwrap().schema_type,
        SchemaType::Unknown
    );

    // Safe default: everything unready, full missing lists.
    let report = service.check_readiness().await;
    assert!(!report.ready);
    let units = report.for_class(EntityClass::Unit).unwrap();
    assert!(!units.ready);
    assert_eq!(units.missing, ["one", "hour", "kilogram", "meter"]);
}

// ── Validation surface ───────────────────────────────────────────

#[tokio::test]
async fn service_validates_against_the_reconciled_cache() {
    let repos = reference_repos();
    let service = make_service(&repos);
    service.initialize().await.unwrap();

    use truecommons_types::WriteIntent;
    assert!(service
        .validate(&WriteIntent::for_action("produce"))
        .is_empty());

    let violations = service.validate(&WriteIntent::for_action("warp"));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].offending_key(), Some("warp"));
}
