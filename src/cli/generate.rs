//! CLI handlers for `generate campaign` and `generate session`

use crate::campaign::plan_session;
use crate::cli::{connect, CampaignArgs, GlobalArgs, SessionArgs};
use tracing::info;

pub async fn campaign(args: CampaignArgs, global: GlobalArgs) -> anyhow::Result<()> {
    info!("Creating a new campaign");
    let ctx = connect(&global).await?;
    let options = global.session_options(&args.party, Vec::new());

    let plan = plan_session(&ctx, None, &options).await?;

    println!("Created campaign {}", plan.properties.campaign_id);
    println!("Session plan {} saved as {}", plan.name, plan.id);
    Ok(())
}

pub async fn session(args: SessionArgs, global: GlobalArgs) -> anyhow::Result<()> {
    info!("Creating a new session for campaign {}", args.campaign_id);
    let ctx = connect(&global).await?;
    let options = global.session_options(&args.party, args.objectives);

    let plan = plan_session(&ctx, Some(&args.campaign_id), &options).await?;

    println!(
        "Session {} plan {} saved as {}",
        plan.properties.session_number, plan.name, plan.id
    );
    if let Some(ref content) = plan.properties.content {
        println!("\n{}", content);
    }
    Ok(())
}
