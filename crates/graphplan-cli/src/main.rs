//! # GraphPlan CLI
//!
//! Runs a forward or backward search on an already-grounded problem stored
//! as JSON and prints the plan.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use graphplan_core::Problem;
use graphplan_planner::{planner_for, PlannerConfig, SearchDirection, SearchOutcome};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit code reported when the search proves the problem infeasible.
const EXIT_INFEASIBLE: u8 = 2;

#[derive(Debug, PartialEq, Eq)]
struct Args {
    problem: PathBuf,
    config: Option<PathBuf>,
    direction: SearchDirection,
    json: bool,
}

fn print_usage() {
    eprintln!("graphplan <problem.json> [options]");
    eprintln!("options:");
    eprintln!("  --backward          search from the goal instead of the initial state");
    eprintln!("  --config <file>     planner configuration (JSON)");
    eprintln!("  --json              print the full result as JSON");
    eprintln!("log level is taken from RUST_LOG (default: info)");
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut problem = None;
    let mut config = None;
    let mut direction = SearchDirection::Forward;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--backward" => direction = SearchDirection::Backward,
            "--forward" => direction = SearchDirection::Forward,
            "--json" => json = true,
            "--config" => {
                let path = iter.next().context("missing value for --config")?;
                config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            path if problem.is_none() => problem = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument: {extra}"),
        }
    }

    Ok(Args {
        problem: problem.context("missing problem file")?,
        config,
        direction,
        json,
    })
}

fn load_problem(path: &Path) -> anyhow::Result<Problem> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read problem {}", path.display()))?;
    let problem: Problem = serde_json::from_str(&raw)
        .with_context(|| format!("invalid problem file {}", path.display()))?;
    problem.validate()?;
    Ok(problem)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Ok(PlannerConfig::from_json(&raw)?)
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    init_tracing()?;

    let problem = load_problem(&args.problem)?;
    let config = load_config(args.config.as_deref())?;
    info!(problem = %args.problem.display(), direction = ?args.direction, "Loaded problem");

    let result = planner_for(args.direction, config).plan(&problem);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match &result.outcome {
            SearchOutcome::Found(plan) => {
                println!("plan ({} steps): {}", plan.len(), plan);
            }
            SearchOutcome::Infeasible => println!("no feasible plan"),
        }
        println!(
            "expanded {} nodes, generated {}, {}ms",
            result.stats.expanded, result.stats.generated, result.stats.elapsed_ms
        );
    }

    Ok(match result.outcome {
        SearchOutcome::Found(_) => ExitCode::SUCCESS,
        SearchOutcome::Infeasible => ExitCode::from(EXIT_INFEASIBLE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = parse_args(&args(&["problem.json"])).unwrap();
        assert_eq!(
            parsed,
            Args {
                problem: PathBuf::from("problem.json"),
                config: None,
                direction: SearchDirection::Forward,
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_options() {
        let parsed =
            parse_args(&args(&["--backward", "p.json", "--config", "c.json", "--json"])).unwrap();
        assert_eq!(parsed.direction, SearchDirection::Backward);
        assert_eq!(parsed.config, Some(PathBuf::from("c.json")));
        assert!(parsed.json);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["p.json", "--config"])).is_err());
        assert!(parse_args(&args(&["p.json", "--fast"])).is_err());
        assert!(parse_args(&args(&["p.json", "q.json"])).is_err());
    }

    #[test]
    fn test_load_config_default() {
        assert_eq!(load_config(None).unwrap(), PlannerConfig::default());
    }

    #[test]
    fn test_demo_problem_solves_both_ways() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let problem = load_problem(&demos.join("delivery.json")).unwrap();
        let config = load_config(Some(&demos.join("config.json"))).unwrap();

        for direction in [SearchDirection::Forward, SearchDirection::Backward] {
            let result = planner_for(direction, config.clone()).plan(&problem);
            let plan = result.outcome.into_plan().unwrap();
            assert_eq!(plan.steps(), ["DriveToDepot", "Load", "DriveToShop", "Unload"]);
        }
    }

    #[test]
    fn test_load_problem_missing_file() {
        let err = load_problem(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read problem"));
    }
}
