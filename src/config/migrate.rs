use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

/// Migration that adds the `pause_estimate_minutes` parameter to the
/// YAML config, if missing, and marks the migration as applied in the
/// `log` table.
pub fn migrate_add_pause_estimate(conn: &Connection) -> Result<(), Error> {
    let version = "20260412_0003_add_pause_estimate_minutes";

    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            let key = Value::String("pause_estimate_minutes".to_string());

            if !map.contains_key(&key) {
                map.insert(key.clone(), Value::Number(15.into()));

                // Serialize updated YAML
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                // Inject documentation comment right after the new line
                let mut new_content = String::new();

                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("pause_estimate_minutes:") {
                        new_content.push_str(
                            "  # minutes charged per pause when a finished run\n\
                             #   has no usable pause-interval data\n",
                        );
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;
            }
        }

        // Marca come applicata
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1,
                     'Added pause_estimate_minutes parameter to config')",
            [version],
        )?;

        success(format!(
            "Migration applied: {} — added pause_estimate_minutes parameter to config.",
            version
        ));
    }

    Ok(())
}
