//! settings-headers.
//!
//! Decrypts the HTTP header values declared in build settings server
//! configurations and manages the master-password encryption they use.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use settings_headers_crypto::{
    encrypt_master_password, encrypt_with_master, MasterPasswordDecryptor, SecuritySettings,
};
use settings_headers_lib::host::{error_chain, run_build};
use settings_headers_lib::paths::resolve_security_location;
use settings_headers_lib::report::CheckReport;
use settings_headers_model::parse_settings_file;
use settings_headers_rewriter::{ExecutionRequest, HeaderDecryptionSpy};
use settings_headers_telemetry::{init_logging, LogFormat, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(
    name = "settings-headers",
    about = "Decrypt HTTP headers declared in build settings",
    version
)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format (pretty or json).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decrypt every HTTP header of a settings file and report the outcome.
    ///
    /// Header values are never printed.
    Check {
        /// Settings file (settings.xml).
        #[arg(short, long)]
        settings: PathBuf,

        /// Security settings holding the master password.
        /// Defaults to ~/.m2/settings-security.xml.
        #[arg(long, env = "SETTINGS_SECURITY")]
        security: Option<PathBuf>,

        /// Output format (text or json).
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Encrypt a master password for settings-security.xml.
    EncryptMaster {
        /// The master password in clear.
        password: String,
    },

    /// Encrypt a value with the master password.
    Encrypt {
        /// The value in clear.
        value: String,

        /// Security settings holding the master password.
        /// Defaults to ~/.m2/settings-security.xml.
        #[arg(long, env = "SETTINGS_SECURITY")]
        security: Option<PathBuf>,
    },
}

/// Run the check command.
fn run_check(settings_path: &Path, security: Option<PathBuf>, output_format: &str) -> ExitCode {
    if output_format != "text" && output_format != "json" {
        eprintln!("error: unknown output format: {}", output_format);
        return ExitCode::from(1);
    }

    let settings = match parse_settings_file(settings_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "error: failed to read settings {}: {}",
                settings_path.display(),
                e
            );
            return ExitCode::from(1);
        }
    };

    let Some(security) = resolve_security_location(security) else {
        eprintln!("error: no security settings location; pass --security");
        return ExitCode::from(1);
    };

    let decryptor = MasterPasswordDecryptor::new(security);
    tracing::debug!(
        settings = %settings_path.display(),
        security = %decryptor.location().display(),
        servers = settings.servers.len(),
        "checking settings"
    );

    let report = CheckReport::new(settings_path.display().to_string(), &settings.servers);
    let mut request = ExecutionRequest::new(settings.servers);
    let spy = HeaderDecryptionSpy::new(decryptor);

    if let Err(e) = run_build(&spy, &mut request) {
        eprintln!("error: {}", error_chain(&e));
        return ExitCode::from(1);
    }

    if output_format == "json" {
        match serde_json::to_string_pretty(&report.to_json()) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("error: failed to render report: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        eprint!("{}", report.to_text());
    }

    ExitCode::SUCCESS
}

/// Run the encrypt-master command.
fn run_encrypt_master(password: &str) -> ExitCode {
    println!("{}", encrypt_master_password(password));
    ExitCode::SUCCESS
}

/// Run the encrypt command.
fn run_encrypt(value: &str, security: Option<PathBuf>) -> ExitCode {
    let Some(security) = resolve_security_location(security) else {
        eprintln!("error: no security settings location; pass --security");
        return ExitCode::from(1);
    };

    let master = match SecuritySettings::load(&security) {
        Ok(SecuritySettings {
            master: Some(master),
            ..
        }) => master,
        Ok(_) => {
            eprintln!("error: master password is not set in {}", security.display());
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("error: {}", error_chain(&e));
            return ExitCode::from(1);
        }
    };

    match encrypt_with_master(value, &master) {
        Ok(encrypted) => {
            println!("{}", encrypted);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to decrypt master password: {}", e);
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!("error: unknown log format: {}", cli.log_format);
        return ExitCode::from(1);
    };
    let telemetry = TelemetryConfig::new()
        .with_log_level(cli.log_level)
        .with_log_format(log_format);
    if let Err(e) = init_logging(&telemetry) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    match cli.command {
        Commands::Check {
            settings,
            security,
            format,
        } => run_check(&settings, security, &format),
        Commands::EncryptMaster { password } => run_encrypt_master(&password),
        Commands::Encrypt { value, security } => run_encrypt(&value, security),
    }
}
