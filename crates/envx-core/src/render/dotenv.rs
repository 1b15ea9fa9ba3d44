//! `dotenv` and `shell` outputs

use std::io::Write;

use super::quote::quote;
use crate::environment::{Environment, ENVIRONMENT_VARIABLES_KEY};
use crate::errors::Result;

/// String-valued members of `environmentVariables`, sorted bytewise by name
///
/// Empty when the property is missing or is not an object. Non-string
/// members are skipped.
pub fn environment_variables(env: &Environment) -> Vec<(&str, &str)> {
    let Some(vars) = env
        .properties()
        .get(ENVIRONMENT_VARIABLES_KEY)
        .and_then(|v| v.as_object())
    else {
        return Vec::new();
    };

    let mut pairs: Vec<(&str, &str)> = vars
        .iter()
        .filter_map(|(name, value)| value.as_str().map(|s| (name, s)))
        .collect();
    pairs.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    pairs
}

/// Write one `NAME="value"` line per variable, prefixed with `export ` for shells
pub(crate) fn write_variables<W: Write + ?Sized>(
    out: &mut W,
    env: &Environment,
    export: bool,
) -> Result<usize> {
    let prefix = if export { "export " } else { "" };
    let vars = environment_variables(env);
    for (name, value) in &vars {
        writeln!(out, "{}{}={}", prefix, name, quote(value))?;
    }
    Ok(vars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_string_members_are_exported() {
        let env = Environment::from_plain(
            r#"{"environmentVariables": {"B": "2", "N": 3, "A": "1", "O": {"x": "y"}}}"#,
        )
        .unwrap();
        assert_eq!(environment_variables(&env), vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_non_object_variables_yield_nothing() {
        for text in [r#"{}"#, r#"{"environmentVariables": "A=1"}"#, r#"{"environmentVariables": null}"#] {
            let env = Environment::from_plain(text).unwrap();
            assert!(environment_variables(&env).is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_sort_is_bytewise() {
        let env = Environment::from_plain(
            r#"{"environmentVariables": {"b": "3", "_x": "2", "B": "1", "a": "4"}}"#,
        )
        .unwrap();
        let names: Vec<_> = environment_variables(&env).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "_x", "a", "b"]);
    }

    #[test]
    fn test_values_are_quoted() {
        let env = Environment::from_plain(
            r#"{"environmentVariables": {"MSG": "line1\nline2 \"q\""}}"#,
        )
        .unwrap();
        let mut buf = Vec::new();
        write_variables(&mut buf, &env, true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "export MSG=\"line1\\nline2 \\\"q\\\"\"\n"
        );
    }
}
