use std::env;

use tracing::warn;

/// Reads the API key from the environment variable named by `env_var`.
/// Returns `None` for a blank name, an unset variable or an empty value.
pub fn resolve_api_key(provider: &str, env_var: Option<&str>) -> Option<String> {
    let name = env_var.map(str::trim).filter(|name| !name.is_empty())?;
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(err) => {
            warn!(
                provider,
                env_var = name,
                %err,
                "API key environment variable is not set; sending unauthenticated requests"
            );
            None
        }
    }
}
