//! Foundation service — the initialization state machine.
//!
//! Drives one run from probing through ordered per-class reconciliation to
//! a terminal readiness state. The run order is fixed: units reconcile
//! before resource specifications (whose payloads reference unit keys),
//! which reconcile before process specifications; the action vocabulary is
//! independent and sits between units and resource specifications.
//!
//! `initialize()` is single-flight: concurrent callers wait on the run in
//! progress and observe its outcome instead of starting a second run. A
//! failed run holds its error until an explicit `reset()`.

use crate::baseline::RequiredBaseline;
use crate::cache::EntityCache;
use crate::error::{FoundationError, FoundationResult};
use crate::probe::{CapabilityProber, SchemaCapabilities, SchemaType};
use crate::reconcile::BaselineReconciler;
use crate::validate::{self, Violation};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use truecommons_types::{EntityClass, WriteIntent};

/// Steps reported through progress: probe, four classes, verification.
const TOTAL_STEPS: usize = 6;

/// Where an initialization run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// No run has started since construction or the last reset.
    NotStarted,
    /// Probing backend capabilities.
    Probing,
    /// Reconciling the baseline for one class.
    Reconciling(EntityClass),
    /// Re-fetching every class to verify readiness.
    Verifying,
    /// All classes ready, or a read-only backend accepted as-is.
    Ready,
    /// The pass completed but required data is missing and the backend
    /// could not be classified as writable or read-only.
    Degraded,
    /// The run failed; `reset()` is required before retrying.
    Failed,
}

impl InitStep {
    /// Whether the step is a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, InitStep::Ready | InitStep::Degraded | InitStep::Failed)
    }
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStep::NotStarted => write!(f, "not started"),
            InitStep::Probing => write!(f, "probing"),
            InitStep::Reconciling(class) => write!(f, "reconciling {class}"),
            InitStep::Verifying => write!(f, "verifying"),
            InitStep::Ready => write!(f, "ready"),
            InitStep::Degraded => write!(f, "degraded"),
            InitStep::Failed => write!(f, "failed"),
        }
    }
}

/// A point-in-time view of initialization progress.
#[derive(Debug, Clone)]
pub struct InitStatus {
    /// The current (or terminal) step.
    pub step: InitStep,
    /// Steps completed so far.
    pub completed: usize,
    /// Total steps in a full run.
    pub total: usize,
    /// Human-readable description of the operation in flight.
    pub current_operation: String,
    /// The failure that ended the last run, if it failed.
    pub last_error: Option<String>,
}

/// Readiness of one reference class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReadiness {
    /// The class checked.
    pub class: EntityClass,
    /// Whether the class's readiness keys are all present.
    pub ready: bool,
    /// Required keys absent from the backend. Can be non-empty while
    /// `ready` is true for classes whose readiness demands only a core
    /// subset (the action vocabulary).
    pub missing: Vec<String>,
}

/// The outcome of a verification pass over all reference classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessReport {
    /// Per-class detail, in reconciliation order.
    pub classes: Vec<ClassReadiness>,
    /// Whether every class is ready.
    pub all_ready: bool,
    /// Overall readiness after the read-only acceptance policy: a backend
    /// with no write path is accepted with whatever subset exists. Callers
    /// needing full completeness must inspect the per-class detail.
    pub ready: bool,
    /// The schema classification the report was computed under.
    pub schema_type: SchemaType,
}

impl ReadinessReport {
    /// The detail entry for one class.
    pub fn for_class(&self, class: EntityClass) -> Option<&ClassReadiness> {
        self.classes.iter().find(|c| c.class == class)
    }

    /// Renders the missing keys per class, for error messages.
    #[must_use]
    pub fn describe_missing(&self) -> String {
        let parts: Vec<String> = self
            .classes
            .iter()
            .filter(|c| !c.missing.is_empty())
            .map(|c| format!("{}: {}", c.class, c.missing.join(", ")))
            .collect();
        if parts.is_empty() {
            "nothing".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[derive(Debug)]
struct ServiceState {
    step: InitStep,
    completed: usize,
    current_operation: String,
    capabilities: Option<SchemaCapabilities>,
    stored_error: Option<FoundationError>,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            step: InitStep::NotStarted,
            completed: 0,
            current_operation: String::new(),
            capabilities: None,
            stored_error: None,
        }
    }
}

/// The foundation service: guarantees the required baseline exists before
/// domain features operate, and gatekeeps candidate writes against the
/// entity cache.
pub struct FoundationService {
    cache: Arc<EntityCache>,
    baseline: Arc<RequiredBaseline>,
    prober: CapabilityProber,
    reconciler: BaselineReconciler,
    run_lock: tokio::sync::Mutex<()>,
    state: Mutex<ServiceState>,
}

impl FoundationService {
    /// Creates a service over the cache's repositories and a baseline table.
    pub fn new(cache: Arc<EntityCache>, baseline: RequiredBaseline) -> Self {
        let baseline = Arc::new(baseline);
        Self {
            prober: CapabilityProber::new(cache.clone()),
            reconciler: BaselineReconciler::new(cache.clone(), baseline.clone()),
            cache,
            baseline,
            run_lock: tokio::sync::Mutex::new(()),
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Creates a service with the standard True Commons baseline.
    pub fn with_default_baseline(cache: Arc<EntityCache>) -> Self {
        Self::new(cache, RequiredBaseline::default())
    }

    /// The entity cache the service reconciles and validates against.
    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    /// The capabilities computed by the last run, until `reset()`.
    pub fn capabilities(&self) -> Option<SchemaCapabilities> {
        self.state.lock().unwrap().capabilities.clone()
    }

    /// The current initialization progress.
    pub fn status(&self) -> InitStatus {
        let state = self.state.lock().unwrap();
        InitStatus {
            step: state.step,
            completed: state.completed,
            total: TOTAL_STEPS,
            current_operation: state.current_operation.clone(),
            last_error: state.stored_error.as_ref().map(ToString::to_string),
        }
    }

    /// Runs probing and ordered per-class reconciliation to a terminal
    /// state.
    ///
    /// Single-flight: while a run is in progress, concurrent callers wait
    /// for it and share its outcome. Once `Ready` or `Degraded`, calls are
    /// no-ops; after `Failed`, calls return the stored error until
    /// `reset()`.
    pub async fn initialize(&self) -> FoundationResult<()> {
        let _run = self.run_lock.lock().await;

        {
            let state = self.state.lock().unwrap();
            match state.step {
                InitStep::Ready | InitStep::Degraded => return Ok(()),
                InitStep::Failed => {
                    if let Some(err) = &state.stored_error {
                        return Err(err.clone());
                    }
                }
                _ => {}
            }
        }

        self.begin_step(InitStep::Probing, 0, "Testing backend capabilities");
        let capabilities = self.prober.probe().await;
        let schema_type = capabilities.schema_type;
        self.state.lock().unwrap().capabilities = Some(capabilities);

        for (pass, class) in EntityClass::RECONCILE_ORDER.into_iter().enumerate() {
            self.begin_step(
                InitStep::Reconciling(class),
                pass + 1,
                &format!("Provisioning {class} baseline"),
            );

            match self.reconciler.reconcile(class).await {
                Ok(_) => {}
                Err(e) if e.is_structural() => {
                    if schema_type == SchemaType::Full {
                        let err = FoundationError::Unsupported {
                            class,
                            message: e.to_string(),
                        };
                        warn!("Initialization failed: {}", err);
                        self.fail(err.clone());
                        return Err(err);
                    }
                    info!(
                        "Accepting {} as-is: writes unsupported on a {} schema",
                        class, schema_type
                    );
                }
                Err(e) => {
                    warn!("Reconciliation of {} did not complete: {}", class, e);
                }
            }
        }

        self.begin_step(InitStep::Verifying, 5, "Verifying foundation data");
        let report = self.verify(schema_type).await;

        let terminal = if report.all_ready {
            InitStep::Ready
        } else if schema_type == SchemaType::ReadOnly {
            info!("Read-only schema: proceeding with the available foundation data");
            InitStep::Ready
        } else if schema_type == SchemaType::Full {
            let err = FoundationError::Incomplete(report);
            warn!("Initialization failed: {}", err);
            self.fail(err.clone());
            return Err(err);
        } else {
            warn!(
                "Foundation degraded, missing {}",
                report.describe_missing()
            );
            InitStep::Degraded
        };

        self.finish(terminal);
        Ok(())
    }

    /// Discards capability, readiness, and error state, returning to
    /// `NotStarted` so a fresh run can be attempted.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = ServiceState::default();
        info!("Foundation service reset");
    }

    /// Re-fetches every reference class and recomputes readiness under the
    /// last probed schema classification (`Unknown` before the first run).
    pub async fn check_readiness(&self) -> ReadinessReport {
        let schema_type = self
            .state
            .lock()
            .unwrap()
            .capabilities
            .as_ref()
            .map_or(SchemaType::Unknown, |c| c.schema_type);
        self.verify(schema_type).await
    }

    /// Checks that a candidate write only references known entities.
    /// Pure and synchronous against the current cache snapshots.
    pub fn validate(&self, intent: &WriteIntent) -> Vec<Violation> {
        validate::validate_intent(&self.cache, intent)
    }

    async fn verify(&self, schema_type: SchemaType) -> ReadinessReport {
        let mut classes = Vec::new();

        for table in self.baseline.classes() {
            let snapshot = match self.cache.refresh(table.class).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    // Safe default: a class we cannot see is a class we
                    // cannot trust.
                    warn!("Readiness fetch for {} failed: {}", table.class, e);
                    return Self::unready_report(&self.baseline, schema_type);
                }
            };

            let missing: Vec<String> = table
                .required_keys
                .iter()
                .filter(|key| !snapshot.contains(key))
                .cloned()
                .collect();
            let ready = table
                .readiness_keys()
                .iter()
                .all(|key| snapshot.contains(key));
            classes.push(ClassReadiness {
                class: table.class,
                ready,
                missing,
            });
        }

        let all_ready = classes.iter().all(|c| c.ready);
        ReadinessReport {
            classes,
            all_ready,
            ready: all_ready || schema_type == SchemaType::ReadOnly,
            schema_type,
        }
    }

    fn unready_report(baseline: &RequiredBaseline, schema_type: SchemaType) -> ReadinessReport {
        let classes = baseline
            .classes()
            .iter()
            .map(|table| ClassReadiness {
                class: table.class,
                ready: false,
                missing: table.required_keys.clone(),
            })
            .collect();
        ReadinessReport {
            classes,
            all_ready: false,
            ready: schema_type == SchemaType::ReadOnly,
            schema_type,
        }
    }

    fn begin_step(&self, step: InitStep, completed: usize, operation: &str) {
        let mut state = self.state.lock().unwrap();
        state.step = step;
        state.completed = completed;
        state.current_operation = operation.to_string();
    }

    fn fail(&self, err: FoundationError) {
        let mut state = self.state.lock().unwrap();
        state.step = InitStep::Failed;
        state.current_operation = String::new();
        state.stored_error = Some(err);
    }

    fn finish(&self, terminal: InitStep) {
        let mut state = self.state.lock().unwrap();
        state.step = terminal;
        state.completed = TOTAL_STEPS;
        state.current_operation = match terminal {
            InitStep::Degraded => "Foundation degraded".to_string(),
            _ => "Foundation ready".to_string(),
        };
        info!("Foundation initialization complete: {}", terminal);
    }
}
