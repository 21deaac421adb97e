use casegen_config::CasegenConfig;

/// Warn about absent settings and env var keys that look mistyped.
pub fn warn_unconfigured(config: &CasegenConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CasegenConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = config
        .missing_settings()
        .into_iter()
        .map(|setting| {
            format!("{setting} is not set; requirements will receive fallback test cases")
        })
        .collect::<Vec<_>>();

    if !config.llm.is_configured() && has_single_underscore_section(&env_keys, "CASEGEN_LLM") {
        warnings.push(
            "LLM config appears default while CASEGEN_LLM_* env vars exist. Use double underscores (example: CASEGEN_LLM__API_KEY)."
                .to_string(),
        );
    }

    for section in ["CASEGEN_EMBEDDINGS", "CASEGEN_CORPUS", "CASEGEN_GENERAL"] {
        if has_single_underscore_section(&env_keys, section) {
            warnings.push(format!(
                "{section}_* env vars are ignored. Use double underscores (example: {section}__<FIELD>)."
            ));
        }
    }

    warnings
}

/// `SECTION_FIELD` present without the `SECTION__FIELD` form.
fn has_single_underscore_section(keys: &[String], section: &str) -> bool {
    let single = format!("{section}_");
    let double = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}

#[cfg(test)]
mod tests {
    use casegen_config::CasegenConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_missing_api_key() {
        let warnings = collect_unconfigured_warnings(&CasegenConfig::default(), Vec::new());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("llm.api_key"));
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &CasegenConfig::default(),
            vec![
                ("CASEGEN_LLM_API_KEY".to_string(), "sk-test".to_string()),
                ("CASEGEN_CORPUS_PATH".to_string(), "c.json".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("CASEGEN_LLM__API_KEY")));
        assert!(warnings.iter().any(|w| w.contains("CASEGEN_CORPUS__<FIELD>")));
    }

    #[test]
    fn quiet_when_configured_correctly() {
        let mut config = CasegenConfig::default();
        config.llm.api_key = "sk-test".to_string();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("CASEGEN_LLM__API_KEY".to_string(), "sk-test".to_string()),
                ("CASEGEN_GENERAL__TOP_K".to_string(), "5".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }
}
