use anyhow::Result;
use scroller::{AgentKind, RunConfig};
use scroller_core::TrainerConfig;
use scroller_env::PlatformerConfig;
use std::path::{Path, PathBuf};
use tempdir::TempDir;
use test_log::test;

fn small_run(dir: &Path, agent: AgentKind) -> RunConfig {
    RunConfig::default()
        .agent(agent)
        .env(
            PlatformerConfig::default()
                .width(40)
                .pits(1)
                .obstacles(1)
                .enemies(1)
                .time_limit(100)
                .level_seed(2),
        )
        .trainer(
            TrainerConfig::default()
                .max_iterations(4)
                .save_interval(2)
                .flush_record_interval(2)
                .max_steps_per_episode(150),
        )
        .model_dir(dir)
}

fn checkpoints(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |e| e == "bin") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[test]
fn bundled_configs_load() -> Result<()> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
    let sarsa = RunConfig::load(dir.join("approx_sarsa.yaml"))?;
    assert_eq!(sarsa.agent, AgentKind::ApproxSarsa);
    assert_eq!(sarsa.hyperparams.seed, Some(42));
    assert_eq!(sarsa.trainer.load_from, None);

    let tabular = RunConfig::load(dir.join("tabular.yaml"))?;
    assert_eq!(tabular.agent, AgentKind::Tabular);
    assert_eq!(tabular.env, PlatformerConfig::default());
    Ok(())
}

#[test]
fn every_agent_writes_checkpoints_and_records() -> Result<()> {
    for agent in [AgentKind::Tabular, AgentKind::ApproxQ, AgentKind::ApproxSarsa] {
        let dir = TempDir::new("scroller")?;
        let config = small_run(dir.path(), agent);
        assert_eq!(scroller::train(&config)?, 4);

        assert_eq!(checkpoints(dir.path())?.len(), 2);
        let mut rdr = csv::Reader::from_path(config.records_path())?;
        assert_eq!(rdr.records().count(), 2);
        assert_eq!(rdr.headers()?.get(0), Some("step"));
    }
    Ok(())
}

#[test]
fn training_resumes_from_a_checkpoint() -> Result<()> {
    let dir = TempDir::new("scroller")?;
    let config = small_run(dir.path(), AgentKind::Tabular);
    scroller::train(&config)?;

    let last = checkpoints(dir.path())?
        .into_iter()
        .find(|p| p.to_string_lossy().ends_with("-iter-4.bin"));
    let last = last.ok_or_else(|| anyhow::anyhow!("no checkpoint of iteration 4"))?;

    let mut trainer = config.trainer.clone().max_iterations(2);
    trainer.load_from = Some(last.to_string_lossy().into_owned());
    let resumed = config.clone().trainer(trainer);
    assert_eq!(scroller::train(&resumed)?, 6);
    Ok(())
}

#[test]
fn resumed_run_appends_to_the_records() -> Result<()> {
    let dir = TempDir::new("scroller")?;
    let config = small_run(dir.path(), AgentKind::ApproxQ);
    scroller::train(&config)?;
    let steps = |path: &Path| -> Result<Vec<String>> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut steps = vec![];
        for row in rdr.records() {
            steps.push(row?.get(0).unwrap_or_default().to_string());
        }
        Ok(steps)
    };
    assert_eq!(steps(&config.records_path())?, vec!["2", "4"]);

    let last = checkpoints(dir.path())?
        .into_iter()
        .find(|p| p.to_string_lossy().ends_with("-iter-4.bin"));
    let last = last.ok_or_else(|| anyhow::anyhow!("no checkpoint of iteration 4"))?;
    let mut trainer = config.trainer.clone().max_iterations(2);
    trainer.load_from = Some(last.to_string_lossy().into_owned());
    scroller::train(&config.clone().trainer(trainer))?;

    assert_eq!(steps(&config.records_path())?, vec!["2", "4", "6"]);
    Ok(())
}

#[test]
fn invalid_hyperparameters_are_rejected() -> Result<()> {
    let dir = TempDir::new("scroller")?;
    let mut config = small_run(dir.path(), AgentKind::ApproxQ);
    config.hyperparams.alpha = 0.0;
    assert!(scroller::train(&config).is_err());
    Ok(())
}
