use crate::campaign::read_sessions;
use crate::cli::{connect, GlobalArgs, ReadArgs};
use tracing::info;

pub async fn execute(args: ReadArgs, global: GlobalArgs) -> anyhow::Result<()> {
    info!("Reading sessions for {}", args.campaign_id);
    let ctx = connect(&global).await?;

    let sessions = read_sessions(&ctx, &args.campaign_id).await?;

    println!(
        "Found {} sessions for campaign {}",
        sessions.len(),
        args.campaign_id
    );
    for session in &sessions {
        println!("\n\n{}:", session.name);
        println!("{}", session.properties.summary);
    }
    Ok(())
}
