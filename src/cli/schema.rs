use crate::campaign::{PlanProperties, SessionProperties};
use crate::cli::{SchemaArgs, SchemaTarget};
use crate::config::Config;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Config => schema_for!(Config),
        SchemaTarget::Plan => schema_for!(PlanProperties),
        SchemaTarget::Session => schema_for!(SessionProperties),
    };
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
