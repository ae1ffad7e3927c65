// Run-scoped shared state
//
// One RunContext exists per test run. The runner builds it before the
// first scenario; worlds and the report writer borrow from it. This is
// the explicit home for what would otherwise be process-wide statics:
// the resolved configuration, the token store and the report layout.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use webtestkit::api::TokenStore;
use webtestkit::config::HarnessConfig;
use webtestkit::report::ReportPaths;

static CONTEXT: OnceLock<RunContext> = OnceLock::new();

/// Shared state for one test run.
#[derive(Debug)]
pub struct RunContext {
    pub config: Arc<HarnessConfig>,
    pub tokens: TokenStore,
    pub report_paths: ReportPaths,
    /// Screenshots captured by the teardown hook, waiting for the report
    /// writer to attach them (keyed by scenario name).
    pub pending_screenshots: Mutex<HashMap<String, String>>,
}

impl RunContext {
    fn new(config: HarnessConfig) -> Self {
        RunContext {
            config: Arc::new(config),
            tokens: TokenStore::new(),
            report_paths: ReportPaths::in_working_dir(),
            pending_screenshots: Mutex::new(HashMap::new()),
        }
    }
}

/// Installs the run context. The first caller wins; later calls return
/// the already-installed context (the runner calls this exactly once,
/// before any scenario starts).
pub fn init(config: HarnessConfig) -> &'static RunContext {
    CONTEXT.get_or_init(|| RunContext::new(config))
}

/// The run context, loading configuration from file + environment when
/// the runner did not install one explicitly.
pub fn get() -> &'static RunContext {
    CONTEXT.get_or_init(|| {
        let config = HarnessConfig::load().unwrap_or_else(|err| {
            panic!("could not load harness configuration: {err}")
        });
        RunContext::new(config)
    })
}
