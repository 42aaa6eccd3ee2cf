//! # brcode CLI
//!
//! Command-line interface for PIX payloads and QR codes.
//!
//! ## Usage
//!
//! ```bash
//! # Print a reusable payload
//! brcode payload --key 12345678000190 --name "JC Contabilidade" --city "Sao Paulo"
//!
//! # Fixed-amount payload using stored settings for the beneficiary
//! brcode --settings pix.json payload --amount 1500,00 --txid REC-2024-001
//!
//! # Save the QR code as PNG
//! brcode --settings pix.json qr --png pix.png --size 300
//!
//! # Inspect a payload
//! brcode verify "000201...6304ABCD"
//!
//! # Start the HTTP server
//! brcode --settings pix.json serve --listen 0.0.0.0:8080
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use brcode::{
    Amount, BrCodeError, PayloadParameters, PixSettings, encode_pix_payload, payload,
    render::qr::{self, QrErrorLevel, QrOptions},
    server::{self, ServerConfig},
    settings::BeneficiaryOverrides,
};

/// brcode - PIX payment payload and QR code utility
#[derive(Parser, Debug)]
#[command(name = "brcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the default PIX key, beneficiary name and city
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the encoded payload
    Payload {
        #[command(flatten)]
        beneficiary: BeneficiaryArgs,
    },

    /// Render the payload as a QR code
    Qr {
        #[command(flatten)]
        beneficiary: BeneficiaryArgs,

        /// Write a PNG file
        #[arg(long, value_name = "FILE", required_unless_present = "data_url")]
        png: Option<PathBuf>,

        /// Print a data:image/png;base64 URL instead
        #[arg(long)]
        data_url: bool,

        /// Image side in pixels
        #[arg(long, default_value = "200")]
        size: u32,

        /// Quiet zone in modules
        #[arg(long, default_value = "1")]
        margin: u32,

        /// Error correction level (L, M, Q, H)
        #[arg(long, default_value = "M")]
        ec: QrErrorLevel,
    },

    /// Decode a payload and check its CRC
    Verify {
        /// Payload text
        payload: String,
    },

    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,
    },
}

#[derive(Args, Debug)]
struct BeneficiaryArgs {
    /// PIX key (CPF, CNPJ, e-mail, phone or random key)
    #[arg(long)]
    key: Option<String>,

    /// Beneficiary name
    #[arg(long)]
    name: Option<String>,

    /// Beneficiary city
    #[arg(long)]
    city: Option<String>,

    /// Fixed amount in reais (e.g. 1500.00 or 1.500,00)
    #[arg(long)]
    amount: Option<Amount>,

    /// Transaction reference (used only with --amount)
    #[arg(long)]
    txid: Option<String>,
}

impl BeneficiaryArgs {
    fn into_parameters(
        self,
        settings: Option<&PixSettings>,
    ) -> Result<PayloadParameters, BrCodeError> {
        let mut params = BeneficiaryOverrides {
            key: self.key,
            name: self.name,
            city: self.city,
        }
        .resolve(settings)?;

        if let Some(amount) = self.amount {
            params = params.amount(amount);
        }
        if let Some(txid) = self.txid {
            params = params.transaction_id(txid);
        }
        Ok(params)
    }
}

fn main() {
    setup_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .ok();
}

fn run() -> Result<(), BrCodeError> {
    let cli = Cli::parse();

    let settings = cli.settings.as_deref().map(PixSettings::load).transpose()?;

    match cli.command {
        Commands::Payload { beneficiary } => {
            let params = beneficiary.into_parameters(settings.as_ref())?;
            println!("{}", encode_pix_payload(&params));
        }

        Commands::Qr {
            beneficiary,
            png,
            data_url,
            size,
            margin,
            ec,
        } => {
            let params = beneficiary.into_parameters(settings.as_ref())?;
            let payload = encode_pix_payload(&params);
            let options = QrOptions::default()
                .width(size)
                .margin(margin)
                .error_level(ec);

            if data_url {
                println!("{}", qr::to_data_url(&payload, &options)?);
            }
            if let Some(path) = png {
                std::fs::write(&path, qr::to_png(&payload, &options)?)?;
                log::info!("Saved QR code to {}", path.display());
            }
        }

        Commands::Verify { payload: text } => {
            let decoded = payload::decode(text.trim())?;
            println!("Checksum OK ({})", decoded.checksum().unwrap_or_default());
            println!(
                "Mode: {}",
                if decoded.is_single_use() {
                    "single-use (fixed amount)"
                } else {
                    "reusable"
                }
            );
            for field in &decoded.fields {
                println!("  {} {:>2} {}", field.id, field.value.chars().count(), field.value);
            }
            println!("Key:       {}", decoded.pix_key().unwrap_or("-"));
            println!("Name:      {}", decoded.merchant_name().unwrap_or("-"));
            println!("City:      {}", decoded.merchant_city().unwrap_or("-"));
            println!("Amount:    {}", decoded.amount().unwrap_or("-"));
            println!("Reference: {}", decoded.reference_label().unwrap_or("-"));
        }

        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
                settings,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}
