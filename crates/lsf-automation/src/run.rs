//! One scrape run: login, settle, read the grade table, aggregate.

use std::time::Duration;

use anyhow::Context;
use lsf_core::aggregator::GradeAggregator;
use lsf_core::credentials::CredentialProvider;
use lsf_core::models::AggregateReport;
use lsf_core::sink::ReportSink;
use lsf_session::auth::{login, LoginForm};
use lsf_session::driver::SessionDriver;
use lsf_session::extractor::TableExtractor;

/// Inputs of a run that do not change while it executes.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub login_url: String,
    pub link_pattern: String,
    pub settle_delay: Duration,
    pub form: LoginForm,
    pub extractor: TableExtractor,
    pub aggregator: GradeAggregator,
}

/// How a run ended when nothing fatal happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The table was read; `None` when it held no usable rows.
    Completed(Option<AggregateReport>),
    /// The login form could not be submitted.
    LoginFailed,
}

/// Execute the run against an open session.
///
/// Login failure is reported as [`RunOutcome::LoginFailed`]. A missing link
/// or table means the page layout changed and is returned as an error.
pub async fn run<D, C>(
    driver: &D,
    credentials: &C,
    plan: &RunPlan,
    sink: &dyn ReportSink,
) -> anyhow::Result<RunOutcome>
where
    D: SessionDriver,
    C: CredentialProvider + ?Sized,
{
    if !login(driver, &plan.login_url, credentials, &plan.form).await {
        tracing::error!("Login aborted due to missing credentials or login error. Exiting.");
        return Ok(RunOutcome::LoginFailed);
    }

    tracing::info!("Waiting briefly after login...");
    tokio::time::sleep(plan.settle_delay).await;

    let rows = plan
        .extractor
        .fetch_table_data(driver, &plan.link_pattern)
        .await
        .context("reading the grade table")?;
    tracing::debug!(rows = rows.len(), "table rows extracted");

    Ok(RunOutcome::Completed(
        plan.aggregator.process_and_log(&rows, sink),
    ))
}

/// [`run`], then close the session whatever the result was.
pub async fn run_and_close<D, C>(
    driver: &D,
    credentials: &C,
    plan: &RunPlan,
    sink: &dyn ReportSink,
) -> anyhow::Result<RunOutcome>
where
    D: SessionDriver,
    C: CredentialProvider + ?Sized,
{
    let outcome = run(driver, credentials, plan, sink).await;
    if let Err(e) = driver.close().await {
        tracing::warn!("Failed to close browser session: {e}");
    }
    outcome
}

// ── Tests ──────────────────────────────────────────────────────────────────────
