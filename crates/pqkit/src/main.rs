//! pqkit binary.
//!
//! # Usage
//!
//! ```bash
//! # Generate a KEM key pair (alice.pub, alice.priv)
//! pqkit keygen kem -a Kyber768 -o alice
//!
//! # Encrypt to it and decrypt again
//! pqkit encrypt -k alice.pub -d "hello world" -a Kyber768 -o msg.bin
//! pqkit decrypt -k alice.priv -d msg.bin -a Kyber768
//!
//! # Sign and verify
//! pqkit keygen sig -o signer
//! pqkit sign -k signer.priv -d release.tar.gz -o release.sig
//! pqkit verify -k signer.pub -d release.tar.gz -s release.sig
//! ```

use std::process::ExitCode;

use clap::Parser;
use pqkit::{Command, Outcome, RuntimeConfig, run};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Post-quantum hybrid encryption and signatures
#[derive(Parser, Debug)]
#[command(name = "pqkit")]
#[command(about = "Post-quantum hybrid encryption and signature tool")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = pqkit::config::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = RuntimeConfig { log_level: args.log_level.clone() };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(config.env_filter())
        .init();

    let mut stdout = std::io::stdout().lock();
    match run(&args.command, &mut stdout) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::SignatureInvalid) => ExitCode::from(1),
        Err(err) => {
            tracing::debug!(tamper_evidence = err.is_tamper_evidence(), "command failed");
            err.report(&mut std::io::stderr().lock());
            ExitCode::FAILURE
        },
    }
}
