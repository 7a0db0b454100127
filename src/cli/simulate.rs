use crate::campaign::{simulate, TurnOutcome};
use crate::cli::{connect, GlobalArgs, SimulateArgs};
use tracing::info;

pub async fn execute(args: SimulateArgs, global: GlobalArgs) -> anyhow::Result<()> {
    info!(
        "Simulating {} turns for campaign {}",
        args.turns, args.campaign_id
    );
    let ctx = connect(&global).await?;
    let options = global.session_options(&args.party, args.objectives);

    let report = simulate(&ctx, &args.campaign_id, args.turns, &options, print_turn).await?;

    println!(
        "\nSimulated {} turns for campaign {} in {:.1}s ({} reused plans, {} generated)",
        report.turns.len(),
        report.campaign_id,
        report.total_duration.as_secs_f64(),
        report.reused_plans(),
        report.generated_plans()
    );
    Ok(())
}

fn print_turn(outcome: &TurnOutcome) {
    println!(
        "\nPlaying turn {} with {} plan {}",
        outcome.turn, outcome.plan_source, outcome.plan_name
    );
    println!(
        "\nSession {} summary: {}\n{}",
        outcome.turn, outcome.session_name, outcome.summary
    );
}
