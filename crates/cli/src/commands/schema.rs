use anyhow::Result;
use runbook_core::configs::recipe::recipe_json_schema;

pub fn execute() -> Result<()> {
    println!("{}", recipe_json_schema()?);
    Ok(())
}
