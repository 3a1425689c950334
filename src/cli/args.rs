//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Forget the stored token
    Logout,
    /// Create an account with interactive prompts
    Signup,
    /// Run the chat screen (default). Carries an explicit token if given.
    RunTui { token: Option<String> },
    /// Argument error; the message is printed with usage
    Invalid(String),
}

/// Parse command-line arguments, skipping the program name.
///
/// # Examples
///
/// ```
/// use chitchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chitchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut token = None;
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--logout" => return CliCommand::Logout,
            "--signup" => return CliCommand::Signup,
            "--token" => match args.next() {
                Some(value) if !value.starts_with("--") => token = Some(value),
                _ => return CliCommand::Invalid("--token needs a value".to_string()),
            },
            other => {
                if let Some(value) = other.strip_prefix("--token=") {
                    token = Some(value.to_string());
                } else {
                    return CliCommand::Invalid(format!("unknown argument: {}", other));
                }
            }
        }
    }
    CliCommand::RunTui { token }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["chitchat".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunTui { token: None });
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flags() {
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(
            parse(&["--token", "abc"]),
            CliCommand::RunTui {
                token: Some("abc".to_string())
            }
        );
        assert_eq!(
            parse(&["--token=xyz"]),
            CliCommand::RunTui {
                token: Some("xyz".to_string())
            }
        );
    }

    #[test]
    fn test_parse_token_without_value() {
        assert!(matches!(parse(&["--token"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["--token", "--logout"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_logout_and_signup() {
        assert_eq!(parse(&["--logout"]), CliCommand::Logout);
        assert_eq!(parse(&["--signup"]), CliCommand::Signup);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("unknown argument: --unknown".to_string())
        );
    }
}
