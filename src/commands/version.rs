use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("hostwatch version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
