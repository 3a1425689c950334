//! Version and usage text.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: chitchat [OPTIONS]

Options:
  --token <TOKEN>  Sign in with a bearer token (saved for later runs)
  --signup         Create an account
  --logout         Forget the saved token
  -V, --version    Print version
  -h, --help       Print this help

Environment:
  CHITCHAT_API_URL        REST base URL
  CHITCHAT_WS_URL         Socket URL
  CHITCHAT_TIMEOUT_SECS   Request timeout in seconds
  CHITCHAT_REMOTE_POLICY  active | all
  CHITCHAT_LOG            Log filter (written to ~/.chitchat/chitchat.log)";

pub fn version_line() -> String {
    format!("chitchat {}", VERSION)
}
