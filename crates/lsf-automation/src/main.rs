mod bootstrap;
mod run;

use std::process::ExitCode;

use anyhow::{Context, Result};
use lsf_core::aggregator::GradeAggregator;
use lsf_core::column_map::ColumnMapping;
use lsf_core::credentials::EnvCredentials;
use lsf_core::settings::Settings;
use lsf_core::sink::TracingSink;
use lsf_session::auth::LoginForm;
use lsf_session::extractor::TableExtractor;
use lsf_session::webdriver::WebDriverSession;

use crate::run::{run_and_close, RunOutcome, RunPlan};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let env_file = bootstrap::load_env_file(None);
    let settings = Settings::load();

    bootstrap::ensure_log_dir(&settings.log_dir)?;
    let log_file = bootstrap::log_file_path(&settings.log_dir, chrono::Local::now());
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("LSF automation v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mapping = ColumnMapping::load_or_default(settings.column_map.as_deref())
        .context("loading column mapping")?;

    let plan = RunPlan {
        login_url: settings.login_url.clone(),
        link_pattern: settings.link_pattern.clone(),
        settle_delay: settings.settle_delay(),
        form: LoginForm::default().with_timeout(settings.wait_timeout()),
        extractor: TableExtractor::default(),
        aggregator: GradeAggregator::new(mapping, settings.numeric_policy()),
    };
    tracing::debug!(
        "Column mapping: {}, numbers: {:?}",
        plan.aggregator.mapping().label(),
        plan.aggregator.policy()
    );

    let driver = match WebDriverSession::connect(&settings.webdriver_url, settings.headless()).await
    {
        Ok(driver) => driver,
        Err(e) => {
            tracing::error!("{e}");
            return Err(e).context("starting browser session");
        }
    };

    let outcome = run_and_close(&driver, &EnvCredentials::default(), &plan, &TracingSink).await;

    match outcome {
        Ok(RunOutcome::LoginFailed) => Ok(ExitCode::from(1)),
        Ok(RunOutcome::Completed(_)) => {
            tracing::info!("Logs written to: {}", log_file.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Scrape failed: {e:#}");
            Err(e)
        }
    }
}
