//! Dependency-flow scheduler.
//!
//! # Algorithm
//!
//! 1. Build a name lookup and filter each step's dependency edges, dropping
//!    self-references and edges to unknown names.
//! 2. Compute in-degrees and run Kahn's algorithm with a FIFO work queue:
//!    steps become ready in declaration order, so ties are deterministic.
//! 3. Steps left unplaced when the queue drains are part of a cycle. Under
//!    the lenient policy they are appended in declared order; under the
//!    strict policy the graph is rejected.
//! 4. Walk the ordered sequence once, assigning each step
//!    `start = max(end of already-scheduled dependencies)` (0 if none),
//!    `end = start + cycle_time`, and `wait = start`. The lead time is the
//!    maximum end time seen.
//!
//! # Complexity
//! O(n + e) where n=steps, e=dependency edges.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Kahn 1962)

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{round2, ScheduledStep, StepSpec};

/// How to treat dependency graphs that contain a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Append steps caught in a cycle after the topologically resolved
    /// steps, in declared order, and schedule them as if independent.
    /// This is a best-effort recovery, not a cycle rejection.
    #[default]
    Lenient,
    /// Reject cyclic graphs with [`CycleError`].
    Strict,
}

/// Cyclic dependency graph, raised only under [`CyclePolicy::Strict`].
#[derive(Debug, Clone, Error)]
#[error("dependency cycle involving steps: {}", .steps.join(", "))]
pub struct CycleError {
    /// Names of the steps that could not be topologically ordered.
    pub steps: Vec<String>,
}

/// A scheduled dependency flow: steps in schedule order plus the lead time.
#[derive(Debug, Clone)]
pub struct Flow {
    /// Steps in schedule order (not necessarily input order).
    pub steps: Vec<ScheduledStep>,
    /// Maximum end time across all steps (hours).
    pub lead_time: f64,
}

/// Converts an unordered set of steps with dependency edges into a totally
/// ordered timeline consistent with those edges, tolerating malformed graphs.
///
/// Under the default lenient policy this scheduler never fails: dangling
/// edges, self-references, and cycles degrade gracefully and are only
/// logged. Duplicate-name validation is the caller's responsibility.
///
/// # Example
///
/// ```
/// use vsm_flow::scheduler::FlowScheduler;
/// use vsm_flow::models::StepSpec;
///
/// let steps = vec![
///     StepSpec::new("A").with_cycle_time(1.0),
///     StepSpec::new("B").with_cycle_time(2.0).with_dependency("A"),
/// ];
/// let flow = FlowScheduler::new().schedule(&steps).unwrap();
/// assert_eq!(flow.lead_time, 3.0);
/// assert_eq!(flow.steps[1].start_time, 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowScheduler {
    cycle_policy: CyclePolicy,
}

impl FlowScheduler {
    /// Creates a scheduler with the lenient cycle policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cycle policy.
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Schedules the given steps.
    ///
    /// Returns `Err` only under [`CyclePolicy::Strict`] when the dependency
    /// graph contains a cycle; the lenient policy always succeeds.
    pub fn schedule(&self, steps: &[StepSpec]) -> Result<Flow, CycleError> {
        let order = self.topological_order(steps)?;

        let mut completion: HashMap<&str, f64> = HashMap::with_capacity(steps.len());
        let mut scheduled = Vec::with_capacity(steps.len());
        let mut lead_time = 0.0_f64;

        for &i in &order {
            let spec = &steps[i];
            // A dependency without a completion time yet (unknown name,
            // self-reference, or an unresolved cycle member) imposes no
            // constraint on this step.
            let start = spec
                .depends_on
                .iter()
                .filter_map(|dep| completion.get(dep.as_str()))
                .fold(0.0_f64, |acc, &end| acc.max(end));
            let cycle = spec.cycle_time.max(0.0);
            let start = round2(start);
            let end = round2(start + cycle);

            lead_time = lead_time.max(end);
            completion.insert(spec.name.as_str(), end);
            scheduled.push(ScheduledStep {
                name: spec.name.clone(),
                cycle_time: cycle,
                cost: spec.cost.max(0.0),
                value_added: spec.value_added,
                depends_on: spec.depends_on.clone(),
                start_time: start,
                end_time: end,
                wait_time: start,
                predicted_wait: None,
                predicted_flag: false,
            });
        }

        Ok(Flow {
            steps: scheduled,
            lead_time: round2(lead_time),
        })
    }

    /// Orders step indices with Kahn's algorithm, appending cycle remainders
    /// in declared order (lenient) or rejecting them (strict).
    fn topological_order(&self, steps: &[StepSpec]) -> Result<Vec<usize>, CycleError> {
        let index: HashMap<&str, usize> = steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();

        // Filtered dependency sets and dependent adjacency, both in
        // declaration order for deterministic tie-breaking.
        let mut indegree = vec![0_usize; steps.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); steps.len()];
        for (i, step) in steps.iter().enumerate() {
            let mut seen = HashSet::new();
            for dep in &step.depends_on {
                match index.get(dep.as_str()) {
                    Some(&j) if j != i => {
                        if seen.insert(j) {
                            indegree[i] += 1;
                            dependents[j].push(i);
                        }
                    }
                    Some(_) => {
                        debug!(step = %step.name, "dropping self-dependency");
                    }
                    None => {
                        warn!(
                            step = %step.name,
                            dependency = %dep,
                            "dropping dependency on unknown step"
                        );
                    }
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..steps.len()).filter(|&i| indegree[i] == 0).collect();
        let mut order = Vec::with_capacity(steps.len());
        let mut placed = vec![false; steps.len()];

        while let Some(i) = queue.pop_front() {
            order.push(i);
            placed[i] = true;
            for &m in &dependents[i] {
                indegree[m] -= 1;
                if indegree[m] == 0 {
                    queue.push_back(m);
                }
            }
        }

        let remainder: Vec<usize> = (0..steps.len()).filter(|&i| !placed[i]).collect();
        if !remainder.is_empty() {
            let names: Vec<String> = remainder.iter().map(|&i| steps[i].name.clone()).collect();
            match self.cycle_policy {
                CyclePolicy::Strict => return Err(CycleError { steps: names }),
                CyclePolicy::Lenient => {
                    warn!(
                        steps = ?names,
                        "dependency cycle detected; appending unresolved steps in declared order"
                    );
                    order.extend(remainder);
                }
            }
        }

        Ok(order)
    }
}
