#![deny(missing_docs)]
//! A command-line interface for sealing files into verified containers and generating HOTP codes.

use clap::{Parser, Subcommand};
use filecrypt_core::config::KEY_ENV_VAR;
use filecrypt_core::container::{self, Transformed, Verification};
use filecrypt_core::{cipher, hash, hotp, mac, Key};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Key used by `demo` when no key is configured.
const DEMO_KEY: &str = "D2F4A67B890CDE51";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Seal a file (writes my_file.txt.enc and my_file.txt.enc.metadata.json)\nfilecrypt --key D2F4A67B890CDE51 encrypt ./my_file.txt\n\n# Open a sealed file, checking the ciphertext against its metadata first\nfilecrypt --key D2F4A67B890CDE51 decrypt --input ./my_file.txt.enc --output ./my_file.txt --metadata ./my_file.txt.enc.metadata.json\n\n# Use a hex key from the environment\nFILECRYPT_KEY=hex:1f8698690e02ca16618550ef7f19da8e filecrypt hotp --counter 86351"
)]
struct Cli {
    /// The 16-byte key. Plain text is used as UTF-8 bytes; prefix with `hex:` for hex.
    #[arg(long, global = true, env = KEY_ENV_VAR, hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal a file into an encrypted container
    Encrypt {
        /// Path to the input file to seal
        #[arg()]
        input: PathBuf,

        /// Path to the output container. If omitted, uses the input filename with a .enc extension.
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Open a sealed container, writing the payload only if both digests verify
    Decrypt {
        /// Path to the container to open
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the output file for the recovered payload
        #[arg(short, long)]
        output: PathBuf,

        /// Path to the metadata file written by `encrypt`. If given, the container is checked against it first.
        #[arg(long, value_name = "METADATA_FILE")]
        metadata: Option<PathBuf>,
    },
    /// Run the raw transform: mode 1 seals SOURCE into DEST, mode 0 opens it
    Transform {
        /// Path to the source file
        source: PathBuf,

        /// Path to the destination file
        dest: PathBuf,

        /// 1 to encode, 0 to decode
        #[arg(long, allow_negative_numbers = true)]
        mode: i32,
    },
    /// Print the SHA-1 and SHA-256 digests of a file
    Digest {
        /// Path to the file to hash
        input: PathBuf,

        /// Also print HMAC-SHA1 of the file under this key (UTF-8 bytes)
        #[arg(long, value_name = "HMAC_KEY")]
        hmac_key: Option<String>,
    },
    /// Print one-time passwords for the configured key
    Hotp {
        /// The counter value of the first code
        #[arg(long, allow_negative_numbers = true)]
        counter: i32,

        /// The number of successive codes to print
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Hash, encrypt and authenticate a sample message
    Demo,
}

/// Metadata stored alongside a container to detect a swapped or damaged file before opening it.
#[derive(serde::Serialize, serde::Deserialize)]
struct ContainerMetadata {
    password: i32,
    payload_length: usize,
    ciphertext_hash: String,
}

fn metadata_path_for(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".metadata.json");
    PathBuf::from(path)
}

fn require_key(key: Option<&str>) -> Key {
    let Some(text) = key else {
        error!("A key is required: pass --key or set {KEY_ENV_VAR}.");
        std::process::exit(1);
    };
    Key::parse(text).unwrap_or_else(|e| {
        error!("Invalid key: {e}");
        std::process::exit(1);
    })
}

fn read_input(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| {
        error!("Failed to read '{}': {e}", path.display());
        std::process::exit(1);
    })
}

fn write_output(path: &Path, data: &[u8]) {
    if let Err(e) = fs::write(path, data) {
        error!("Failed to write '{}': {e}", path.display());
        std::process::exit(1);
    }
}

fn encrypt(key: &Key, input: &Path, output: Option<&Path>) {
    let output = output.map_or_else(
        || {
            let mut path = input.as_os_str().to_owned();
            path.push(".enc");
            PathBuf::from(path)
        },
        Path::to_path_buf,
    );

    let payload = read_input(input);
    info!("Sealing '{}' ({} bytes)", input.display(), payload.len());
    let sealed = container::encode(&payload, key).unwrap_or_else(|e| {
        error!("Failed to seal '{}': {e}", input.display());
        std::process::exit(1);
    });
    write_output(&output, &sealed.ciphertext);

    let metadata = ContainerMetadata {
        password: sealed.password,
        payload_length: payload.len(),
        ciphertext_hash: hash::to_hex(&hash::sha256(&sealed.ciphertext)),
    };
    let metadata_path = metadata_path_for(&output);
    let metadata_str = serde_json::to_string_pretty(&metadata).unwrap_or_else(|e| {
        error!("Failed to serialize metadata: {e}");
        std::process::exit(1);
    });
    write_output(&metadata_path, metadata_str.as_bytes());

    println!(
        "Successfully encrypted file '{}' to '{}'",
        input.display(),
        output.display()
    );
    println!("Password: {}", sealed.password);
    println!("Metadata saved to '{}'", metadata_path.display());
}

fn decrypt(key: &Key, input: &Path, output: &Path, metadata: Option<&Path>) {
    let ciphertext = read_input(input);

    let expected = metadata.map(|meta_path| {
        let metadata_str = fs::read_to_string(meta_path).unwrap_or_else(|e| {
            error!("Failed to read metadata file: {e}");
            std::process::exit(1);
        });
        let meta: ContainerMetadata = serde_json::from_str(&metadata_str).unwrap_or_else(|e| {
            error!("Failed to parse metadata file: {e}");
            std::process::exit(1);
        });
        let calculated_hash = hash::to_hex(&hash::sha256(&ciphertext));
        if calculated_hash != meta.ciphertext_hash {
            error!("Ciphertext hash does not match metadata hash. The file may be corrupt or tampered with. Aborting.");
            std::process::exit(1);
        }
        meta
    });

    let verification = container::decode(&ciphertext, key).unwrap_or_else(|e| {
        error!("Failed to open '{}': {e}", input.display());
        std::process::exit(1);
    });
    let payload = match verification {
        Verification::Verified(payload) => payload,
        Verification::Rejected(mismatch) => {
            error!(
                "Integrity check failed for '{}' (sha1 ok: {}, sha256 ok: {}). Nothing was written.",
                input.display(),
                mismatch.sha1_matches,
                mismatch.sha256_matches
            );
            std::process::exit(1);
        }
    };
    if let Some(meta) = expected {
        if meta.payload_length != payload.len() {
            warn!(
                "Metadata records {} payload bytes but the container holds {}",
                meta.payload_length,
                payload.len()
            );
        }
    }

    write_output(output, &payload);
    println!(
        "Successfully decrypted file '{}' to '{}'",
        input.display(),
        output.display()
    );
}

fn transform(key: &Key, source: &Path, dest: &Path, mode: i32) {
    match container::transform_file(source, dest, mode, key) {
        Ok(Transformed::Encoded { password }) => {
            println!("Encoded '{}' to '{}'", source.display(), dest.display());
            println!("Password: {password}");
        }
        Ok(Transformed::Decoded { length }) => {
            println!(
                "Decoded '{}' to '{}' ({length} bytes)",
                source.display(),
                dest.display()
            );
        }
        Ok(Transformed::Rejected(_)) => {
            error!(
                "Integrity check failed for '{}'. Nothing was written.",
                source.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("Transform failed: {e}");
            std::process::exit(1);
        }
    }
}

fn digest(input: &Path, hmac_key: Option<&str>) {
    let data = read_input(input);
    println!("SHA-1: {}", hash::to_hex(&hash::sha1(&data)));
    println!("SHA-256: {}", hash::to_hex(&hash::sha256(&data)));
    if let Some(hmac_key) = hmac_key {
        println!(
            "HMAC-SHA1: {}",
            hash::to_hex(&mac::hmac_sha1(&data, hmac_key.as_bytes()))
        );
    }
}

fn print_hotp(key: &Key, counter: i32, count: u32) {
    info!("Generating {count} code(s) starting at counter {counter}");
    let generator = hotp::Hotp::new(key.as_bytes(), counter);
    for code in generator.take(count as usize) {
        println!("{}", hotp::format_otp(code));
    }
}

fn demo(key: &Key) {
    println!("Crypto Application Running..");
    let data = b"Hello, world!";
    println!("SHA-1: {}", hash::to_hex(&hash::sha1(data)));
    println!("SHA-256: {}", hash::to_hex(&hash::sha256(data)));

    let encrypted = cipher::encrypt(key, data);
    match cipher::decrypt(key, &encrypted) {
        Ok(decrypted) => println!("AES Decrypted: {}", String::from_utf8_lossy(&decrypted)),
        Err(e) => {
            error!("AES round trip failed: {e}");
            std::process::exit(1);
        }
    }

    let hmac = mac::hmac_sha1(data, b"myhmackey");
    println!("HMAC-SHA1: {}", hash::to_hex(&hmac));
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let key_text = cli.key.as_deref();

    match &cli.command {
        Commands::Encrypt { input, output } => {
            encrypt(&require_key(key_text), input, output.as_deref());
        }
        Commands::Decrypt {
            input,
            output,
            metadata,
        } => decrypt(&require_key(key_text), input, output, metadata.as_deref()),
        Commands::Transform { source, dest, mode } => {
            transform(&require_key(key_text), source, dest, *mode);
        }
        Commands::Digest { input, hmac_key } => digest(input, hmac_key.as_deref()),
        Commands::Hotp { counter, count } => {
            print_hotp(&require_key(key_text), *counter, *count);
        }
        Commands::Demo => demo(&require_key(key_text.or(Some(DEMO_KEY)))),
    }
}
