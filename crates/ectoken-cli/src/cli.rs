//! Command-line surface.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ectoken",
    version,
    about = "Issue and verify encrypted access tokens",
    long_about = "Seals an access-control payload (e.g. `ec_expire=1700000000`) with\n\
        AES-256-GCM under SHA-256(secret) and prints it as an unpadded\n\
        URL-safe base64 token. The secret is read from EC_SECRET unless\n\
        --secret is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Shared secret; overrides EC_SECRET
    #[arg(long, global = true)]
    pub secret: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt a payload and print the token
    Encrypt(EncryptArgs),

    /// Decrypt a token and print the payload
    Decrypt(DecryptArgs),
}

#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Payload to seal, or `-` to read it from stdin
    pub plaintext: String,
}

#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Token to open, or `-` to read it from stdin
    pub token: String,
}

/// Resolve a positional argument, reading stdin when it is `-`.
pub fn resolve_input(arg: &str) -> Result<String> {
    read_input(arg, io::stdin().lock())
}

/// Return `arg` unchanged, or the contents of `reader` without its final line
/// ending when `arg` is `-`.
fn read_input<R: Read>(arg: &str, mut reader: R) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(trim_line_ending(buf))
}

fn trim_line_ending(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
