//! Cipherbench CLI
//!
//! Command-line front end for the cryptography workbench.

use anyhow::{bail, Result};
use cipherbench_core::crypto::descriptor::KeyShape;
use cipherbench_core::{
    Action, Algorithm, Config, DhParams, DiffieHellman, Dispatcher, Ecdh, KeyAgreement,
    KeyExchangeSession, KeyMaterial, Role,
};
use cipherbench_primitives::builtin_dispatcher;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cipherbench")]
#[command(author, version, about = "Classical and modern ciphers, side by side")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with the chosen algorithm
    Encrypt(CipherArgs),

    /// Decrypt text with the chosen algorithm
    Decrypt(CipherArgs),

    /// Generate a key pair (RSA, ECIES, ECDH)
    Keygen {
        #[arg(short, long)]
        algorithm: Algorithm,
    },

    /// Show how Rail Fence lays text out across its rails
    Visualize {
        #[arg(short, long)]
        rails: String,

        text: String,
    },

    /// Simulate a two-party key exchange
    Exchange {
        #[command(subcommand)]
        command: ExchangeCommands,
    },
}

#[derive(Subcommand)]
enum ExchangeCommands {
    /// Finite-field Diffie-Hellman
    Dh {
        /// Prime modulus (defaults to CIPHERBENCH_DH_PRIME or 23)
        #[arg(long)]
        prime: Option<String>,

        /// Generator (defaults to CIPHERBENCH_DH_GENERATOR or 5)
        #[arg(long)]
        generator: Option<String>,
    },

    /// Elliptic-curve Diffie-Hellman over the toy curve
    Ecdh,
}

#[derive(Args)]
struct CipherArgs {
    #[arg(short, long)]
    algorithm: Algorithm,

    /// Block cipher key, keyword, or rail count
    #[arg(short, long)]
    key: Option<String>,

    /// RSA modulus
    #[arg(long)]
    n: Option<String>,

    /// RSA public exponent
    #[arg(long)]
    e: Option<String>,

    /// RSA private exponent
    #[arg(long)]
    d: Option<String>,

    /// ECIES public point, "(x, y)"
    #[arg(long)]
    public: Option<String>,

    /// ECIES private scalar
    #[arg(long)]
    private: Option<String>,

    text: String,
}

impl CipherArgs {
    /// Missing fields become empty strings so validation names them.
    fn key_material(&self) -> KeyMaterial {
        match self.algorithm.descriptor().key_shape {
            KeyShape::RsaTriple => KeyMaterial::rsa(
                self.n.clone().unwrap_or_default(),
                self.e.clone().unwrap_or_default(),
                self.d.clone(),
            ),
            KeyShape::CurvePoint => KeyMaterial::Ecies {
                public: self.public.clone(),
                private: self.private.clone(),
            },
            _ => KeyMaterial::secret(self.key.clone().unwrap_or_default()),
        }
    }
}

#[derive(Serialize)]
struct CipherOutput<'a> {
    algorithm: Algorithm,
    action: Action,
    output: &'a str,
}

#[derive(Serialize)]
struct GridOutput {
    rails: usize,
    columns: usize,
    grid: Vec<String>,
    ciphertext: String,
}

#[derive(Serialize)]
struct ExchangeOutput {
    algorithm: Algorithm,
    public_a: String,
    public_b: String,
    secret_a: String,
    secret_b: String,
    agrees: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if Config::init_from_env().is_err() {
        debug!(target: "cli", "Config already initialized");
    }

    let dispatcher = builtin_dispatcher();

    match cli.command {
        Commands::Encrypt(args) => run_cipher(&dispatcher, Action::Encrypt, &args, cli.json).await?,
        Commands::Decrypt(args) => run_cipher(&dispatcher, Action::Decrypt, &args, cli.json).await?,
        Commands::Keygen { algorithm } => {
            let keys = dispatcher.generate_keys(algorithm).await?;
            let report = keys.report(algorithm);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} key pair", report.algorithm);
                println!("  public:  {}", report.public);
                println!("  private: {}", report.private);
            }
        }
        Commands::Visualize { rails, text } => {
            let grid = dispatcher.visualize(&text, &rails)?;
            if cli.json {
                let output = GridOutput {
                    rails: grid.rails(),
                    columns: grid.columns(),
                    grid: grid.render(),
                    ciphertext: grid.read_rows(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", grid);
                println!();
                println!("ciphertext: {}", grid.read_rows());
            }
        }
        Commands::Exchange { command } => match command {
            ExchangeCommands::Dh { prime, generator } => {
                let config = Config::global();
                let prime = prime.unwrap_or_else(|| config.dh_default_prime.to_string());
                let generator = generator.unwrap_or_else(|| config.dh_default_generator.to_string());
                let params = DhParams::parse(&prime, &generator)?;
                run_exchange(&dispatcher, DiffieHellman::new(params), cli.json).await?;
            }
            ExchangeCommands::Ecdh => run_exchange(&dispatcher, Ecdh, cli.json).await?,
        },
    }

    Ok(())
}

async fn run_cipher(
    dispatcher: &Dispatcher,
    action: Action,
    args: &CipherArgs,
    json: bool,
) -> Result<()> {
    let key = args.key_material();
    let output = dispatcher
        .execute(args.algorithm, action, &args.text, &key)
        .await?;

    if json {
        let report = CipherOutput {
            algorithm: args.algorithm,
            action,
            output: &output,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

async fn run_exchange<K: KeyAgreement>(dispatcher: &Dispatcher, agreement: K, json: bool) -> Result<()> {
    let algorithm = agreement.algorithm();
    let mut session = KeyExchangeSession::new(agreement);

    let public_a = session.generate(dispatcher, Role::A).await?.to_string();
    let public_b = session.generate(dispatcher, Role::B).await?.to_string();
    let outcome = session.compute_secrets(dispatcher).await?;

    let output = ExchangeOutput {
        algorithm,
        public_a,
        public_b,
        secret_a: outcome.secret_a.to_string(),
        secret_b: outcome.secret_b.to_string(),
        agrees: outcome.agrees(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} key exchange", output.algorithm);
        println!("  A public: {}", output.public_a);
        println!("  B public: {}", output.public_b);
        println!("  A secret: {}", output.secret_a);
        println!("  B secret: {}", output.secret_b);
        println!("  agree:    {}", if output.agrees { "yes" } else { "NO" });
    }

    if !output.agrees {
        bail!("{} secrets do not match", output.algorithm);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false),
        )
        .init();
}
