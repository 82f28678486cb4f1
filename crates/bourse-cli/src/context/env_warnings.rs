use bourse_config::ENV_PREFIX;

/// Sections and fields figment can map `BOURSE_<SECTION>__<FIELD>` onto.
const SECTIONS: [(&str, &[&str]); 2] = [
    ("GENERAL", &["MANIFEST_PATH"]),
    ("DOCTOR", &["CONCURRENCY", "TIMEOUT_MS"]),
];

/// Variables that share the prefix but are not settings overrides.
const NON_SETTINGS: [&str; 1] = ["BOURSE_LOG"];

/// Warn about `BOURSE_*` variables that silently fall back to defaults.
pub fn warn_suspicious_env<I>(env: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for warning in collect_env_warnings(env) {
        tracing::warn!("{warning}");
    }
}

fn collect_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with(ENV_PREFIX) && !NON_SETTINGS.contains(&key.as_str()))
        .collect::<Vec<_>>();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| {
            let rest = &key[ENV_PREFIX.len()..];
            match rest.split_once("__") {
                None => Some(format!(
                    "{key} has no '__' section separator and is ignored (example: BOURSE_DOCTOR__CONCURRENCY)"
                )),
                Some((section, field)) => {
                    let section_upper = section.to_ascii_uppercase();
                    let Some((_, fields)) = SECTIONS.iter().find(|(name, _)| *name == section_upper)
                    else {
                        return Some(format!(
                            "{key} targets unknown settings section '{}' (known: general, doctor)",
                            section.to_ascii_lowercase()
                        ));
                    };
                    if fields.contains(&field.to_ascii_uppercase().as_str()) {
                        None
                    } else {
                        Some(format!(
                            "{key} targets unknown field '{}.{}' (known: {})",
                            section.to_ascii_lowercase(),
                            field.to_ascii_lowercase(),
                            fields.join(", ").to_ascii_lowercase()
                        ))
                    }
                }
            }
        })
        .collect()
}
