use anyhow::Result;
use scrub_core::EntityType;

pub fn handle() -> Result<()> {
    for entity in EntityType::ALL {
        println!("{}", entity);
    }
    Ok(())
}
