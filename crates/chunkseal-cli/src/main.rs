//! chunkseal: RSA-OAEP encryption of files of any size
//!
//! Commands:
//!   keygen              - generate a keypair and write PEM key files
//!   encrypt             - encrypt a file (or stdin) with a public key
//!   decrypt             - decrypt a file (or stdin) with a private key
//!   sizes               - print the chunk/block size table
//!   config show         - display current configuration

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use chunkseal_core::config::ChunksealConfig;
use chunkseal_core::KeySizeClass;
use chunkseal_crypto::{keys, ChunkedCodec, SizePolicy};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "chunkseal",
    version,
    about = "Chunked RSA-OAEP file encryption",
    long_about = "chunkseal: encrypt payloads of any length with RSA-OAEP (SHA-256), one block per chunk"
)]
struct Cli {
    /// Path to chunkseal.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "CHUNKSEAL_CONFIG",
        default_value = "~/.config/chunkseal/config.toml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, env = "CHUNKSEAL_LOG")]
    log: Option<String>,

    /// Log format; overrides config
    #[arg(long, env = "CHUNKSEAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an RSA keypair
    ///
    /// Writes `<private>_private.pem` and `<public>_public.pem`. The private key
    /// is encrypted when --passphrase-env names a non-empty variable.
    Keygen {
        /// Key size in bits: 1024, 2048, 3072 or 4096 (default: from config)
        #[arg(long, short = 'b')]
        bits: Option<usize>,
        /// Private key file prefix (default: <key_dir>/id)
        #[arg(long)]
        private: Option<PathBuf>,
        /// Public key file prefix (default: same as --private)
        #[arg(long)]
        public: Option<PathBuf>,
        /// Name of the environment variable holding the private key passphrase
        #[arg(long)]
        passphrase_env: Option<String>,
    },

    /// Encrypt a file with a public key
    Encrypt {
        /// Public key PEM file
        #[arg(long, short = 'k')]
        key: PathBuf,
        /// Input file ("-" for stdin)
        #[arg(long, short = 'i', default_value = "-")]
        input: PathBuf,
        /// Output file ("-" for stdout)
        #[arg(long, short = 'o', default_value = "-")]
        output: PathBuf,
        /// Write base64 text instead of raw binary
        #[arg(long, short = 'a')]
        armor: bool,
    },

    /// Decrypt a file with a private key
    Decrypt {
        /// Private key PEM file
        #[arg(long, short = 'k')]
        key: PathBuf,
        /// Input file ("-" for stdin)
        #[arg(long, short = 'i', default_value = "-")]
        input: PathBuf,
        /// Output file ("-" for stdout)
        #[arg(long, short = 'o', default_value = "-")]
        output: PathBuf,
        /// Input is base64 text produced by `encrypt --armor`
        #[arg(long, short = 'a')]
        armor: bool,
        /// Name of the environment variable holding the private key passphrase
        #[arg(long)]
        passphrase_env: Option<String>,
    },

    /// Print maximum chunk and block sizes per key size
    Sizes {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let (config, found) = load_config(&config_path)?;

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = match cli.log_format.clone() {
        Some(f) => f,
        None => LogFormat::from_str(&config.log.format, true)
            .map_err(|e| anyhow::anyhow!("invalid log format in config: {e}"))?,
    };
    init_logging(&level, &format);

    if !found {
        warn!("config file not found: {}  (using defaults)", config_path.display());
    }

    match cli.command {
        Commands::Keygen { bits, private, public, passphrase_env } => cmd_keygen(
            &config,
            bits,
            private.as_deref(),
            public.as_deref(),
            passphrase_env.as_deref(),
        ),
        Commands::Encrypt { key, input, output, armor } => {
            cmd_encrypt(&config, &key, &input, &output, armor)
        }
        Commands::Decrypt { key, input, output, armor, passphrase_env } => cmd_decrypt(
            &config,
            &key,
            &input,
            &output,
            armor,
            passphrase_env.as_deref(),
        ),
        Commands::Sizes { json } => cmd_sizes(json),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &config_path),
    }
}

// ── Config loading / logging ──────────────────────────────────────────────────

/// Returns the parsed config and whether the file existed.
fn load_config(path: &Path) -> Result<(ChunksealConfig, bool)> {
    if path.exists() {
        let config = ChunksealConfig::from_path(path)
            .with_context(|| format!("loading config: {}", path.display()))?;
        Ok((config, true))
    } else {
        Ok((ChunksealConfig::default(), false))
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout may carry ciphertext, so logs go to stderr
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── `chunkseal keygen` ────────────────────────────────────────────────────────

fn cmd_keygen(
    config: &ChunksealConfig,
    bits: Option<usize>,
    private: Option<&Path>,
    public: Option<&Path>,
    passphrase_env: Option<&str>,
) -> Result<()> {
    let class = match bits {
        Some(b) => KeySizeClass::from_bits(b)?,
        None => config.keys.default_bits,
    };
    let passphrase = read_passphrase(passphrase_env)?;

    let (private_path, public_path) = resolve_key_paths(config, private, public);
    if let Some(dir) = private_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating key directory: {}", dir.display()))?;
    }
    if let Some(dir) = public_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating key directory: {}", dir.display()))?;
    }

    info!(%class, "generating keypair");
    let pair = chunkseal_crypto::generate_keypair(class)?;

    let written_private = keys::save_private_key(&private_path, pair.private_key(), passphrase.as_ref())
        .with_context(|| format!("writing private key: {}", private_path.display()))?;
    let written_public = keys::save_public_key(&public_path, pair.public_key())
        .with_context(|| format!("writing public key: {}", public_path.display()))?;

    println!("Generated {class} keypair");
    println!("  private: {}", written_private.display());
    println!("  public:  {}", written_public.display());
    if passphrase.is_none() {
        println!("  (private key is NOT passphrase-protected)");
    }
    Ok(())
}

/// `<prefix>_private` / `<prefix>_public`; the public prefix defaults to the private one.
fn resolve_key_paths(
    config: &ChunksealConfig,
    private: Option<&Path>,
    public: Option<&Path>,
) -> (PathBuf, PathBuf) {
    let private_prefix = private
        .map(Path::to_path_buf)
        .unwrap_or_else(|| expand_tilde(&config.keys.key_dir).join("id"));
    let public_prefix = public.map(Path::to_path_buf).unwrap_or_else(|| private_prefix.clone());
    (
        with_suffix(&private_prefix, "_private"),
        with_suffix(&public_prefix, "_public"),
    )
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// ── `chunkseal encrypt` / `decrypt` ───────────────────────────────────────────

fn cmd_encrypt(
    config: &ChunksealConfig,
    key_path: &Path,
    input: &Path,
    output: &Path,
    armor: bool,
) -> Result<()> {
    let public_key = keys::load_public_key(key_path)
        .with_context(|| format!("loading public key: {}", key_path.display()))?;
    let plaintext = read_input(input)?;

    let codec = ChunkedCodec::new(config.codec.clone());
    let ciphertext = codec.encrypt_long(&public_key, &plaintext).context("encryption failed")?;

    let out = if armor { armor_encode(&ciphertext) } else { ciphertext };
    write_output(output, &out)?;
    info!(input = %input.display(), output = %output.display(), bytes = plaintext.len(), "encrypted");
    Ok(())
}

fn cmd_decrypt(
    config: &ChunksealConfig,
    key_path: &Path,
    input: &Path,
    output: &Path,
    armor: bool,
    passphrase_env: Option<&str>,
) -> Result<()> {
    let passphrase = read_passphrase(passphrase_env)?;
    let private_key = keys::load_private_key(key_path, passphrase.as_ref())
        .with_context(|| format!("loading private key: {}", key_path.display()))?;

    let raw = read_input(input)?;
    let ciphertext = if armor { armor_decode(&raw)? } else { raw };

    let codec = ChunkedCodec::new(config.codec.clone());
    let plaintext = codec.decrypt_long(&private_key, &ciphertext).context("decryption failed")?;

    write_output(output, &plaintext)?;
    info!(input = %input.display(), output = %output.display(), bytes = plaintext.len(), "decrypted");
    Ok(())
}

fn read_passphrase(var: Option<&str>) -> Result<Option<SecretString>> {
    let Some(var) = var else {
        return Ok(None);
    };
    let value = std::env::var(var)
        .with_context(|| format!("passphrase environment variable {var} is not set"))?;
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(SecretString::from(value)))
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("reading input: {}", path.display()))
    }
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data).context("writing stdout")?;
        stdout.flush().context("flushing stdout")
    } else {
        std::fs::write(path, data).with_context(|| format!("writing output: {}", path.display()))
    }
}

fn armor_encode(ciphertext: &[u8]) -> Vec<u8> {
    let mut text = STANDARD.encode(ciphertext).into_bytes();
    text.push(b'\n');
    text
}

fn armor_decode(text: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = text.iter().copied().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD.decode(compact).context("input is not valid base64")
}

// ── `chunkseal sizes` ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SizeRow {
    bits: usize,
    max_plain_chunk_bytes: usize,
    cipher_block_bytes: usize,
}

fn size_rows() -> Vec<SizeRow> {
    SizePolicy::table()
        .into_iter()
        .map(|(class, entry)| SizeRow {
            bits: class.bits(),
            max_plain_chunk_bytes: entry.max_plain_chunk_bytes,
            cipher_block_bytes: entry.cipher_block_bytes,
        })
        .collect()
}

fn cmd_sizes(json: bool) -> Result<()> {
    let rows = size_rows();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{:>6}  {:>10}  {:>10}", "bits", "max chunk", "block");
        for row in &rows {
            println!(
                "{:>6}  {:>10}  {:>10}",
                row.bits, row.max_plain_chunk_bytes, row.cipher_block_bytes
            );
        }
    }
    Ok(())
}

// ── `chunkseal config show` ───────────────────────────────────────────────────

fn cmd_config_show(config: &ChunksealConfig, path: &Path) -> Result<()> {
    println!("# config: {}", path.display());
    print!("{}", toml::to_string_pretty(config).context("serializing config")?);
    Ok(())
}

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(rest)
    } else {
        path.to_path_buf()
    }
}
