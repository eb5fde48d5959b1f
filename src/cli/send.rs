use anyhow::Context;
use dinnerplan::email::EmailService;
use dinnerplan::pipeline::read_plan_source;
use dinnerplan::{Config, WeeklyDigest};
use time::Date;

/// Build the weekly email and send it, or print it on a dry run
#[tracing::instrument(skip(config))]
pub async fn send(
    config: Config,
    plan_source: String,
    week_of: Date,
    dry_run: bool,
) -> anyhow::Result<()> {
    if !dry_run {
        config
            .validate_delivery()
            .context("email delivery is not configured")?;
    }

    let content = read_plan_source(&plan_source)?;
    let digest = WeeklyDigest::prepare(&content, week_of, &config.planner)
        .with_context(|| format!("failed to prepare weekly plan from {plan_source}"))?;

    if dry_run {
        println!(
            "{}",
            digest.dry_run_report(&config.email.target_email, config.email.include_html)
        );
        return Ok(());
    }

    let target = &config.email.target_email;
    tracing::info!(to = %target, subject = %digest.subject, "Sending weekly plan email");

    let service = EmailService::new(&config.email)?;
    service
        .send_weekly_plan(target, &digest.subject, &digest.content)
        .await?;

    tracing::info!("Weekly meal planning complete");

    Ok(())
}
