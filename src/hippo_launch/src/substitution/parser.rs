//! Substitution parser

use crate::{error::SubstitutionError, substitution::types::Substitution};

/// Parse substitution string like "$(var x)" or "text $(env Y) more"
///
/// `$$(` is an escaped literal `$(`. Nested substitutions are rejected;
/// argument names and package names are plain identifiers in every launch
/// description this crate builds.
pub fn parse_substitutions(input: &str) -> Result<Vec<Substitution>, SubstitutionError> {
    let mut result = Vec::new();
    let mut text = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch != '$' {
            text.push(ch);
            continue;
        }
        if input[i..].starts_with("$$(") {
            text.push_str("$(");
            chars.next();
            chars.next();
            continue;
        }
        let Some((_, '(')) = chars.peek() else {
            text.push(ch);
            continue;
        };

        if !text.is_empty() {
            result.push(Substitution::Text(std::mem::take(&mut text)));
        }

        // Skip the '('
        chars.next();

        let sub_start = i + 2;
        let mut sub_end = None;
        for (pos, c) in chars.by_ref() {
            match c {
                '(' => {
                    return Err(SubstitutionError::InvalidSubstitution(format!(
                        "nested substitutions are not supported: {}",
                        input
                    )))
                }
                ')' => {
                    sub_end = Some(pos);
                    break;
                }
                _ => {}
            }
        }

        let sub_end = sub_end.ok_or_else(|| {
            SubstitutionError::InvalidSubstitution(format!(
                "Unmatched parentheses in substitution: {}",
                input
            ))
        })?;

        result.push(parse_substitution_content(&input[sub_start..sub_end])?);
    }

    // Empty input is a single empty text
    if !text.is_empty() || result.is_empty() {
        result.push(Substitution::Text(text));
    }

    Ok(result)
}

/// Parse the content inside a substitution $(...)
fn parse_substitution_content(content: &str) -> Result<Substitution, SubstitutionError> {
    let trimmed = content.trim();
    let (sub_type, args) = match trimmed.split_once(char::is_whitespace) {
        Some((sub_type, args)) => (sub_type, Some(args.trim())),
        None => (trimmed, None),
    };

    let required = |what: &str| {
        args.filter(|a| !a.is_empty()).ok_or_else(|| {
            SubstitutionError::InvalidSubstitution(format!("{} requires an argument", what))
        })
    };

    match sub_type {
        "var" => Ok(Substitution::LaunchConfiguration(
            required("var")?.to_string(),
        )),
        "env" => {
            let (name, default) = split_env_args(required("env")?);
            Ok(Substitution::EnvironmentVariable { name, default })
        }
        "optenv" => {
            let (name, default) = split_env_args(required("optenv")?);
            Ok(Substitution::OptionalEnvironmentVariable { name, default })
        }
        "find-pkg-share" => Ok(Substitution::FindPackageShare(
            required("find-pkg-share")?.to_string(),
        )),
        "" => Err(SubstitutionError::InvalidSubstitution(
            "Empty substitution".to_string(),
        )),
        other => Err(SubstitutionError::InvalidSubstitution(format!(
            "Unknown substitution type: {}",
            other
        ))),
    }
}

/// Split "NAME default words" into the variable name and its default
fn split_env_args(args: &str) -> (String, Option<String>) {
    match args.split_once(char::is_whitespace) {
        Some((name, default)) => (name.to_string(), Some(default.trim().to_string())),
        None => (args.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let subs = parse_substitutions("hello world").unwrap();
        assert_eq!(subs, vec![Substitution::Text("hello world".to_string())]);
    }

    #[test]
    fn test_parse_var_substitution() {
        let subs = parse_substitutions("$(var vehicle_name)").unwrap();
        assert_eq!(
            subs,
            vec![Substitution::LaunchConfiguration("vehicle_name".to_string())]
        );
    }

    #[test]
    fn test_parse_env_with_default() {
        let subs = parse_substitutions("$(env ROS_DOMAIN_ID 0)").unwrap();
        assert_eq!(
            subs,
            vec![Substitution::EnvironmentVariable {
                name: "ROS_DOMAIN_ID".to_string(),
                default: Some("0".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_optenv() {
        let subs = parse_substitutions("$(optenv HIPPO_DEVICE)").unwrap();
        assert_eq!(
            subs,
            vec![Substitution::OptionalEnvironmentVariable {
                name: "HIPPO_DEVICE".to_string(),
                default: None,
            }]
        );
    }

    #[test]
    fn test_parse_mixed() {
        let subs = parse_substitutions(
            "$(find-pkg-share hippo_control)/config/actuator_mixer/$(var vehicle_type).yaml",
        )
        .unwrap();
        assert_eq!(
            subs,
            vec![
                Substitution::FindPackageShare("hippo_control".to_string()),
                Substitution::Text("/config/actuator_mixer/".to_string()),
                Substitution::LaunchConfiguration("vehicle_type".to_string()),
                Substitution::Text(".yaml".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_dollar_without_paren() {
        let subs = parse_substitutions("cost: $5").unwrap();
        assert_eq!(subs, vec![Substitution::Text("cost: $5".to_string())]);
    }

    #[test]
    fn test_parse_escaped_dollar_paren() {
        let subs = parse_substitutions("a$$(b)").unwrap();
        assert_eq!(subs, vec![Substitution::Text("a$(b)".to_string())]);

        let subs = parse_substitutions("$$(var x)/$(var y)").unwrap();
        assert_eq!(
            subs,
            vec![
                Substitution::Text("$(var x)/".to_string()),
                Substitution::LaunchConfiguration("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_substitutions("$(var vehicle_name").is_err());
        assert!(parse_substitutions("$(var)").is_err());
        assert!(parse_substitutions("$()").is_err());
        assert!(parse_substitutions("$(unknown x)").is_err());
        assert!(parse_substitutions("$(var $(env NAME))").is_err());
    }
}
