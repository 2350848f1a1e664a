/// Case-insensitive substring test used by the dashboard search boxes.
/// An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `RUST_LOG` wins over the configured filter; `info` if neither is set.
pub fn init_logging(filter: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(filter.unwrap_or("info"));
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_and_surrounding_space() {
        assert!(contains_ignore_case("Horizon Ventures", "horizon"));
        assert!(contains_ignore_case("Horizon Ventures", "  VENT "));
        assert!(contains_ignore_case("anything", ""));
        assert!(contains_ignore_case("anything", "   "));
        assert!(!contains_ignore_case("Chen Capital", "horizon"));
    }
}
