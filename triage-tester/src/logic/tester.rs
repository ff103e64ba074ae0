use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::logic::game_tester::{GameTester, SimulationPlan, SimulationSummary};
use crate::scenarios::TestScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "millis")]
    pub average_duration: Duration,
    #[serde(with = "millis::vec")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    tester: GameTester,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(tester: GameTester, verbose: bool) -> Self {
        Self { tester, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (style: {} seed: {})",
                    scenario.name.bright_white(),
                    scenario.plan.style,
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let (successes, failures, performance_data) =
            self.run_simulation_iterations(&scenario.plan, seed, iterations);

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: avg_duration,
            performance_data,
        }
    }

    fn run_simulation_iterations(
        &self,
        plan: &SimulationPlan,
        seed: u64,
        iterations: usize,
    ) -> (usize, Vec<String>, Vec<Duration>) {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let summary = self.tester.run_plan(plan, iteration_seed);

            if let Some(err) = evaluate_expectations(plan, &summary) {
                let stats = summary.final_state.stats();
                failures.push(format!(
                    "Iteration {} (style {}, character {}, seed {}, session {}, turns {}, ending {}): {} | {} | final SLA {} Morale {} Quality {}",
                    i + 1,
                    summary.style,
                    summary.character,
                    summary.seed,
                    summary.session_id,
                    summary.final_state.turn(),
                    summary.result.ending,
                    err,
                    summarize_decision_path(&summary),
                    stats.sla,
                    stats.morale,
                    stats.quality
                ));

                if self.verbose {
                    println!(
                        "  ❌ Iteration {}/{} failed: {}",
                        i + 1,
                        iterations,
                        err.red()
                    );
                }
            } else {
                successes += 1;
                let duration = start_time.elapsed();
                performance_data.push(duration);

                if self.verbose {
                    println!(
                        "  ✅ Iteration {}/{} passed ({duration:?}) turns:{} ending:{} grade:{:?}",
                        i + 1,
                        iterations,
                        summary.final_state.turn(),
                        summary.result.ending,
                        summary.result.grade
                    );
                }
            }
        }

        (successes, failures, performance_data)
    }
}

fn evaluate_expectations(plan: &SimulationPlan, summary: &SimulationSummary) -> Option<String> {
    for expectation in &plan.expectations {
        if let Err(err) = expectation.evaluate(summary) {
            return Some(format!("{err:#}"));
        }
    }
    None
}

fn summarize_decision_path(summary: &SimulationSummary) -> String {
    if summary.decisions.is_empty() {
        return "no decisions recorded".to_string();
    }

    summary
        .decisions
        .iter()
        .rev()
        .take(3)
        .map(|d| {
            format!(
                "turn {} ({} @ {}): {} [{} {}]",
                d.turn,
                d.scenario_id,
                d.location,
                d.choice_label,
                d.policy_name,
                if d.correct { "ok" } else { "wrong" }
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Durations travel as whole milliseconds in reports.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    fn to_ms(duration: &Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(to_ms(duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }

    pub mod vec {
        use super::{Deserialize, Deserializer, Duration, Serializer, to_ms};

        pub fn serialize<S: Serializer>(
            durations: &[Duration],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(durations.iter().map(to_ms))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Duration>, D::Error> {
            let raw = Vec::<u64>::deserialize(deserializer)?;
            Ok(raw.into_iter().map(Duration::from_millis).collect())
        }
    }
}
