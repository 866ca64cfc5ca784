//! # Scenario DSL
//!
//! A builder API for readable Given-When-Then registry scenarios.
//!
//! ## Example
//!
//! ```rust,ignore
//! Scenario::new("Anchored login verifies")
//!     .with_orgs(1)
//!     .when("the admin anchors a login event", |ctx| {
//!         let id = ctx.harness.save_log(0, 0, b"login ok").unwrap();
//!         ctx.store("id", id);
//!     })
//!     .then("the raw event verifies", |ctx| {
//!         assert!(ctx.harness.verify(0, ctx.load("id"), b"login ok"));
//!     })
//!     .run();
//! ```

extern crate std;

use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use soroban_sdk::BytesN;

use super::invariants::InvariantSet;
use super::{RegistryHarness, TestEnv};

// ── Scenario Context ─────────────────────────────────────────────────────────

/// Mutable context passed to scenario steps.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a RegistryHarness<'b>,
    /// Users registered during the scenario, per org, on top of the
    /// harness fixtures. Used for invariant snapshots.
    pub extra_users: Vec<Vec<BytesN<32>>>,
    data: HashMap<String, u64>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a RegistryHarness<'b>) -> Self {
        Self {
            harness,
            extra_users: std::vec![Vec::new(); harness.orgs.len()],
            data: HashMap::new(),
        }
    }

    /// Store a named value for later steps.
    pub fn store(&mut self, key: &str, value: u64) {
        self.data.insert(key.into(), value);
    }

    pub fn load(&self, key: &str) -> u64 {
        *self
            .data
            .get(key)
            .unwrap_or_else(|| panic!("Scenario variable '{}' not found", key))
    }

    /// All users known for invariant checks.
    pub fn known_users(&self) -> Vec<Vec<BytesN<32>>> {
        self.harness
            .orgs
            .iter()
            .zip(&self.extra_users)
            .map(|(org, extra)| org.users.iter().chain(extra).cloned().collect())
            .collect()
    }
}

// ── Step Types ───────────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

struct Step {
    description: String,
    action: StepFn,
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

/// A Given-When-Then scenario over a fresh [`RegistryHarness`].
///
/// Invariants, when attached, are checked between the When and Then phases.
pub struct Scenario {
    name: String,
    num_orgs: usize,
    users_per_org: usize,
    given_steps: Vec<Step>,
    when_steps: Vec<Step>,
    then_steps: Vec<Step>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            num_orgs: 1,
            users_per_org: 1,
            given_steps: Vec::new(),
            when_steps: Vec::new(),
            then_steps: Vec::new(),
            invariants: None,
        }
    }

    pub fn with_orgs(mut self, n: usize) -> Self {
        self.num_orgs = n.max(1);
        self
    }

    pub fn with_users_per_org(mut self, n: usize) -> Self {
        self.users_per_org = n.max(1);
        self
    }

    pub fn given<F>(mut self, description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.given_steps.push(Step {
            description: description.into(),
            action: Box::new(action),
        });
        self
    }

    pub fn when<F>(mut self, description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.when_steps.push(Step {
            description: description.into(),
            action: Box::new(action),
        });
        self
    }

    pub fn then<F>(mut self, description: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.then_steps.push(Step {
            description: description.into(),
            action: Box::new(assertion),
        });
        self
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Runs every step in order. Panics on the first failed assertion, naming
    /// the scenario and the step.
    pub fn run(self) {
        let mut env = TestEnv::new();
        let harness = RegistryHarness::new(&mut env, self.num_orgs, self.users_per_org);
        let mut ctx = ScenarioContext::new(&harness);
        let name = self.name;

        for step in self.given_steps.into_iter().chain(self.when_steps) {
            run_step(&name, "given/when", step, &mut ctx);
        }

        if let Some(ref invariants) = self.invariants {
            let snapshot = harness.snapshot(&ctx.known_users());
            let violations = invariants.check_all(&snapshot);
            if !violations.is_empty() {
                let mut report = std::format!(
                    "Scenario '{}': invariant violations after actions:\n",
                    name
                );
                for (inv, msg) in &violations {
                    report.push_str(&std::format!("  ✗ [{}]: {}\n", inv, msg));
                }
                panic!("{}", report);
            }
        }

        for step in self.then_steps {
            run_step(&name, "then", step, &mut ctx);
        }
    }
}

fn run_step(scenario: &str, phase: &str, step: Step, ctx: &mut ScenarioContext<'_, '_>) {
    let Step {
        description,
        action,
    } = step;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| action(ctx)));
    if let Err(cause) = result {
        std::eprintln!("Scenario '{scenario}' failed in {phase} step: {description}");
        std::panic::resume_unwind(cause);
    }
}

// ── Assertion Helpers ────────────────────────────────────────────────────────

/// Assert that a `try_*` client call failed with the expected contract error.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(
                e, $expected,
                "Expected error {:?}, got {:?}",
                $expected, e
            ),
            Err(Err(e)) => panic!("Unexpected SDK error: {:?}", e),
            Ok(_) => panic!("Expected error {:?}, but operation succeeded", $expected),
        }
    };
}

// ── Batch Scenario Runner ────────────────────────────────────────────────────

/// Run multiple scenarios; returns `(passed, failed)`.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let total = scenarios.len();
    let mut failures = 0;

    for scenario in scenarios {
        let name = scenario.name.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scenario.run();
        }));

        match result {
            Ok(()) => std::eprintln!("  ✓ {}", name),
            Err(_) => {
                std::eprintln!("  ✗ {}", name);
                failures += 1;
            }
        }
    }

    (total - failures, failures)
}
