use std::path::Path;

use super::types::{Args, MEMORY_DB};

impl Args {
    /// Check the database settings before anything is opened.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the database name is blank or its directory does not exist
    pub fn validate(&self) -> Result<(), String> {
        let Some(name) = self.db_name.as_deref() else {
            return Ok(());
        };
        if name.trim().is_empty() {
            return Err("Database name must not be blank".to_string());
        }
        if name == MEMORY_DB {
            return Ok(());
        }
        match Path::new(name).parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(format!(
                "Directory '{}' for the database does not exist",
                dir.display()
            )),
            _ => Ok(()),
        }
    }
}
