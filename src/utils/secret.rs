use std::{env, fs};

use tracing::{error, warn};

/// Reads a secret either from the file named by `<name>_FILE` or from `<name>` itself.
///
/// The file variant wins when both are present, so container secrets can
/// override a stale value left in `.env`. Blank values count as missing.
pub fn get_secret(name: &str) -> Option<String> {
    let file_var = format!("{name}_FILE");

    let value = match env::var(&file_var) {
        Ok(secret_file_path) => match fs::read_to_string(&secret_file_path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        },
        Err(_) => env::var(name).ok(),
    };

    value.filter(|v| {
        let present = !v.trim().is_empty();
        if !present {
            warn!(secret = name, "Secret is set but empty");
        }
        present
    })
}
