use crate::{
    error::Error,
    hook,
    report::{
        allure::{Stage, Status, StatusDetails, StepResult, TestResult},
        ResultsStore,
    },
    ApiSession, Configuration, Scenario,
};
use lazy_static::lazy_static;
use std::{
    any::Any,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    thread,
};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

lazy_static! {
    static ref TEST_RUN: TestRun = TestRun::new();
}

/// What a test body hands back: `()` or a `Result` whose error marks the test
/// as broken.
pub trait TestOutcome {
    fn failure(&self) -> Option<String>;
}

impl TestOutcome for () {
    fn failure(&self) -> Option<String> {
        None
    }
}

impl<T, E: Display> TestOutcome for Result<T, E> {
    fn failure(&self) -> Option<String> {
        self.as_ref().err().map(|e| e.to_string())
    }
}

/// Handle given to a running test: the shared session plus the scenario it
/// runs.
#[derive(Debug)]
pub struct TestContext {
    scenario: Scenario,
    session: ApiSession,
    steps: Vec<StepResult>,
    start: i64,
}

impl TestContext {
    fn new(scenario: Scenario, session: ApiSession) -> Self {
        Self {
            scenario,
            session,
            steps: Vec::new(),
            start: now_millis(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn session(&mut self) -> &mut ApiSession {
        &mut self.session
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// Runs `f` as a named report step. A panic inside the step marks it
    /// failed and keeps unwinding.
    pub fn step<T, F>(&mut self, name: &str, f: F) -> T
    where
        T: TestOutcome,
        F: FnOnce(&mut ApiSession) -> T,
    {
        let start = now_millis();
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut self.session)));
        let (status, message) = classify(&result);

        self.steps.push(StepResult {
            name: String::from(name),
            status,
            status_details: StatusDetails { message },
            stage: Stage::Finished,
            start,
            stop: now_millis(),
        });

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Owns the run-wide resources: configuration, results store and, while no
/// test is running, the session.
#[derive(Debug)]
pub struct Harness {
    configuration: Configuration,
    store: ResultsStore,
    session: Option<ApiSession>,
}

impl Harness {
    pub fn new(configuration: Configuration) -> Result<Self, Error> {
        let session = ApiSession::new(&configuration)?;
        Self::with_session(configuration, session)
    }

    pub fn with_session(configuration: Configuration, session: ApiSession) -> Result<Self, Error> {
        let store = ResultsStore::open(configuration.results_dir())?;
        store.write_environment(&configuration.environment_properties())?;

        info!(
            base_url = configuration.base_url(),
            results = %store.dir().display(),
            "notes API test run started"
        );

        Ok(Self {
            configuration,
            store,
            session: Some(session),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn store(&self) -> &ResultsStore {
        &self.store
    }

    /// Hands the session to a test. The previous test's response is dropped
    /// so a test that sends nothing attaches nothing.
    pub fn before_test(&mut self, scenario: &Scenario) -> Result<TestContext, Error> {
        let mut session = self.session.take().ok_or(Error::SessionInUse)?;
        session.take_last_response();

        Ok(TestContext::new(*scenario, session))
    }

    /// Runs the report hook, records the result and takes the session back.
    pub fn after_test<T: TestOutcome>(
        &mut self,
        context: TestContext,
        outcome: &thread::Result<T>,
    ) -> Status {
        let TestContext {
            scenario,
            session,
            steps,
            start,
        } = context;

        let attachments = hook::attach_last_response(&session, &self.store, &self.configuration);
        let (status, message) = classify(outcome);

        let result = TestResult {
            uuid: Uuid::new_v4().to_string(),
            history_id: String::from(scenario.name),
            name: String::from(scenario.title),
            full_name: String::from(scenario.name),
            status,
            status_details: StatusDetails { message },
            stage: Stage::Finished,
            start,
            stop: now_millis(),
            labels: scenario.labels(),
            steps,
            attachments,
        };

        if let Err(error) = self.store.write_result(&result) {
            warn!(%error, scenario = scenario.name, "couldn't write the test result");
        }
        info!(scenario = scenario.name, ?status, "test finished");

        self.session = Some(session);
        status
    }
}

/// The process-wide run used by `#[api_test]`. Tests are admitted one at a
/// time; the harness is created by the first test that enters.
pub struct TestRun {
    harness: Mutex<Option<Harness>>,
    running: Mutex<bool>,
    released: Condvar,
}

impl TestRun {
    fn new() -> Self {
        Self {
            harness: Mutex::new(None),
            running: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    pub fn before_test(
        scenario: &Scenario,
        configure: fn(&mut Configuration),
    ) -> Result<TestContext, Error> {
        TEST_RUN.enter_test();

        let context = TEST_RUN.start_test(scenario, configure);
        if context.is_err() {
            TEST_RUN.exit_test();
        }

        context
    }

    pub fn after_test<T: TestOutcome>(context: TestContext, outcome: &thread::Result<T>) -> Status {
        let status = match TEST_RUN.lock_harness().as_mut() {
            Some(harness) => harness.after_test(context, outcome),
            None => {
                warn!("test finished outside of a configured run");
                classify(outcome).0
            }
        };
        TEST_RUN.exit_test();

        status
    }

    fn start_test(
        &self,
        scenario: &Scenario,
        configure: fn(&mut Configuration),
    ) -> Result<TestContext, Error> {
        let mut harness = self.lock_harness();

        if harness.is_none() {
            init_tracing();
            let mut configuration = Configuration::from_env();
            configure(&mut configuration);
            *harness = Some(Harness::new(configuration)?);
        }

        harness
            .as_mut()
            .ok_or(Error::NotConfigured)?
            .before_test(scenario)
    }

    fn lock_harness(&self) -> MutexGuard<'_, Option<Harness>> {
        // test panics are caught before they can reach this lock
        self.harness.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter_test(&self) {
        let running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        let mut running = self
            .released
            .wait_while(running, |is_test_running| *is_test_running)
            .unwrap_or_else(PoisonError::into_inner);
        *running = true;
    }

    fn exit_test(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        *running = false;

        self.released.notify_one();
    }
}

/// Leaves the configuration untouched.
pub fn keep_configuration(_: &mut Configuration) {}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_test_writer()
        .try_init();
}

fn classify<T: TestOutcome>(outcome: &thread::Result<T>) -> (Status, Option<String>) {
    match outcome {
        Ok(value) => match value.failure() {
            Some(message) => (Status::Broken, Some(message)),
            None => (Status::Passed, None),
        },
        Err(payload) => (Status::Failed, Some(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        String::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("test panicked")
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
