use chronctl_models::dtos::EnvironmentVariable;

/// Parses a comma separated list of name=value pairs. A bare name gets an
/// empty value, empty segments and segments with more than one `=` are
/// dropped, the way the scheduler API has always seen them.
pub fn parse_environment(environment: &str) -> Vec<EnvironmentVariable> {
    environment
        .split(',')
        .filter_map(|entry| {
            let fields: Vec<&str> = entry.split('=').collect();
            match fields[..] {
                [name] if !name.is_empty() => Some(EnvironmentVariable::new(name, "")),
                [name, value] => Some(EnvironmentVariable::new(name, value)),
                _ => None,
            }
        })
        .collect()
}
