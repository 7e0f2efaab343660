use crate::cli::Result;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Banned Addresses to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(banned: &[String], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.write_record(["IP Address"])?;

    for address in banned {
        writer.write_record([address])?;
    }

    writer.flush()?;

    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
