//! Tabula CLI tool
//!
//! A command-line interface for classical polyalphabetic ciphers over
//! natural-language alphabets.

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tabula::{
    files::{self, Mode},
    keygen, AlphabetCatalog, ChainedTabulaRecta, Cipher, CipherError, CipherRegistry, CipherResult,
    CipherSpec, KeyMaterial, NgramFormatter,
};
use tracing::{debug, info};

/// Tabula: Caesar, Didimus, Fibonacci, Bellaso, Vigenère and Affine ciphers
#[derive(Parser)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with custom alphabets (default: ~/.tabula/alphabets.json if present)
    #[arg(long, global = true)]
    alphabets_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Cipher selection and key material shared by every transform command
#[derive(Args)]
struct CipherArgs {
    /// Cipher variant (caesar, didimus, fibonacci, bellaso, vigenere, affine)
    #[arg(short, long, default_value = "caesar")]
    cipher: String,

    /// Primary alphabet name
    #[arg(short, long, default_value = "latin")]
    alphabet: String,

    /// Secondary alphabets consulted in order (e.g. --chain digits --chain punctuation)
    #[arg(long)]
    chain: Vec<String>,

    /// Single-character key (caesar, didimus, fibonacci)
    #[arg(short, long)]
    key: Option<String>,

    /// Alternate key offset (didimus)
    #[arg(long)]
    offset: Option<usize>,

    /// Multi-character secret (bellaso, vigenere)
    #[arg(short, long)]
    secret: Option<String>,

    /// Affine multiplier, coprime with every alphabet size
    #[arg(long)]
    affine_a: Option<u32>,

    /// Affine increment
    #[arg(long)]
    affine_b: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text (argument or stdin)
    Encode {
        /// Plaintext; read from stdin when omitted
        text: Option<String>,

        #[command(flatten)]
        cipher: CipherArgs,

        /// Group output into blocks of this many characters
        #[arg(short, long)]
        ngram: Option<usize>,
    },

    /// Decrypt text (argument or stdin)
    Decode {
        /// Ciphertext; read from stdin when omitted
        text: Option<String>,

        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Encrypt a file
    EncodeFile {
        /// Input file
        input: PathBuf,

        /// Output file (default: <input>.tab)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the file as raw bytes
        #[arg(long)]
        binary: bool,

        /// Decode the result and compare BLAKE3 digests before writing
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Decrypt a file
    DecodeFile {
        /// Input file
        input: PathBuf,

        /// Output file (default: <input>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the file as raw bytes
        #[arg(long)]
        binary: bool,

        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// List available alphabets
    Alphabets,

    /// List available cipher variants
    Ciphers,

    /// Generate a random key or secret from an alphabet
    Keygen {
        /// Alphabet to draw from
        #[arg(short, long, default_value = "latin")]
        alphabet: String,

        /// Secret length (1 = single key)
        #[arg(short, long, default_value = "1")]
        length: usize,
    },
}

fn main() {
    // Logs go to stderr so stdout carries only cipher output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tabula=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.alphabets_file.as_deref()).unwrap_or_else(|e| fail(e));

    let outcome = match cli.command {
        Commands::Encode { text, cipher, ngram } => cmd_encode(&catalog, &cipher, text, ngram),
        Commands::Decode { text, cipher } => cmd_decode(&catalog, &cipher, text),
        Commands::EncodeFile {
            input,
            output,
            binary,
            verify,
            cipher,
        } => cmd_encode_file(&catalog, &cipher, &input, output, binary, verify),
        Commands::DecodeFile {
            input,
            output,
            binary,
            cipher,
        } => cmd_decode_file(&catalog, &cipher, &input, output, binary),
        Commands::Alphabets => {
            cmd_alphabets(&catalog);
            Ok(())
        }
        Commands::Ciphers => {
            cmd_ciphers();
            Ok(())
        }
        Commands::Keygen { alphabet, length } => cmd_keygen(&catalog, &alphabet, length),
    };

    if let Err(e) = outcome {
        fail(e);
    }
}

fn fail(err: CipherError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn default_alphabets_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tabula").join("alphabets.json"))
}

fn load_catalog(explicit: Option<&Path>) -> CipherResult<AlphabetCatalog> {
    let mut catalog = AlphabetCatalog::builtin()?;

    match explicit {
        Some(path) => {
            let count = catalog.load_json(path)?;
            info!("Loaded {} custom alphabets from {:?}", count, path);
        }
        None => {
            if let Some(path) = default_alphabets_path().filter(|p| p.exists()) {
                let count = catalog.load_json(&path)?;
                debug!("Loaded {} custom alphabets from {:?}", count, path);
            }
        }
    }
    Ok(catalog)
}

fn build_cipher(catalog: &AlphabetCatalog, args: &CipherArgs) -> CipherResult<Cipher> {
    let mut chain = ChainedTabulaRecta::from_alphabet(catalog.get(&args.alphabet)?.clone());
    for name in &args.chain {
        chain = chain.with_alphabet(catalog.get(name)?.clone());
    }

    let mut material = KeyMaterial::default();
    if let Some(key) = &args.key {
        material = material.with_key(Cipher::parse_key(key)?);
    }
    if let Some(offset) = args.offset {
        material = material.with_offset(offset);
    }
    if let Some(secret) = &args.secret {
        material = material.with_secret(secret.as_str());
    }
    material.a = args.affine_a;
    material.b = args.affine_b;

    let spec = CipherSpec {
        cipher: args.cipher.parse()?,
        material,
    };
    spec.build(&CipherRegistry::builtin(), chain)
}

fn read_text(text: Option<String>) -> CipherResult<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
    }
}

fn cmd_encode(
    catalog: &AlphabetCatalog,
    args: &CipherArgs,
    text: Option<String>,
    ngram: Option<usize>,
) -> CipherResult<()> {
    let mut cipher = build_cipher(catalog, args)?;
    let plain = read_text(text)?;
    let encoded = cipher.encode(&plain)?;

    match ngram {
        Some(size) => println!("{}", NgramFormatter::new(size)?.format(&encoded)),
        None => println!("{}", encoded),
    }
    Ok(())
}

fn cmd_decode(catalog: &AlphabetCatalog, args: &CipherArgs, text: Option<String>) -> CipherResult<()> {
    let mut cipher = build_cipher(catalog, args)?;
    let encoded = read_text(text)?;
    println!("{}", cipher.decode(&encoded)?);
    Ok(())
}

fn mode_for(binary: bool) -> Mode {
    if binary {
        Mode::Binary
    } else {
        Mode::Text
    }
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn cmd_encode_file(
    catalog: &AlphabetCatalog,
    args: &CipherArgs,
    input: &Path,
    output: Option<PathBuf>,
    binary: bool,
    verify: bool,
) -> CipherResult<()> {
    let mut cipher = build_cipher(catalog, args)?;
    let output = output.unwrap_or_else(|| with_extension(input, "tab"));
    let mode = mode_for(binary);

    let report = if verify {
        files::encrypt_file_verified(&mut cipher, input, &output, mode)?
    } else {
        files::encrypt_file(&mut cipher, input, &output, mode)?
    };

    println!("Encrypted: {:?} -> {:?}", input, output);
    println!("Bytes: {} in, {} out", report.bytes_in, report.bytes_out);
    if let Some(digest) = report.digest {
        println!("Verified BLAKE3: {}", digest);
    }
    Ok(())
}

fn cmd_decode_file(
    catalog: &AlphabetCatalog,
    args: &CipherArgs,
    input: &Path,
    output: Option<PathBuf>,
    binary: bool,
) -> CipherResult<()> {
    let mut cipher = build_cipher(catalog, args)?;
    let output = output.unwrap_or_else(|| with_extension(input, "txt"));
    let report = files::decrypt_file(&mut cipher, input, &output, mode_for(binary))?;

    println!("Decrypted: {:?} -> {:?}", input, output);
    println!("Bytes: {} in, {} out", report.bytes_in, report.bytes_out);
    Ok(())
}

fn cmd_alphabets(catalog: &AlphabetCatalog) {
    println!("Available alphabets:");
    for alphabet in catalog.iter() {
        let preview: String = alphabet.runes().iter().take(40).collect();
        println!("  {:<12} {:>4}  {}", alphabet.name(), alphabet.len(), preview.escape_debug());
    }
}

fn cmd_ciphers() {
    println!("Available ciphers:");
    for entry in CipherRegistry::builtin().entries() {
        println!("  {:<10} {}", entry.variant, entry.summary);
    }
}

fn cmd_keygen(catalog: &AlphabetCatalog, alphabet: &str, length: usize) -> CipherResult<()> {
    let alphabet = catalog.get(alphabet)?;
    if length == 1 {
        println!("{}", keygen::generate_key(alphabet));
    } else {
        println!("{}", keygen::generate_secret(alphabet, length)?.as_str());
    }
    Ok(())
}
