// digipin/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use digipin_core::domain::address::AddressParts;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "digipin")]
#[command(about = "DIGIPIN grid codes and address validation, online or offline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding digipin.yaml (and the audit log)
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Never contact the backend; answer everything locally
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Structured address fields shared by `validate` and `suggest`.
#[derive(Args, Debug, Clone, Default)]
pub struct AddressArgs {
    #[arg(long)]
    pub house_no: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub area: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub pincode: Option<String>,
    #[arg(long)]
    pub landmark: Option<String>,
}

impl From<AddressArgs> for AddressParts {
    fn from(args: AddressArgs) -> Self {
        AddressParts {
            house_no: args.house_no,
            street: args.street,
            area: args.area,
            district: args.district,
            pincode: args.pincode,
            landmark: args.landmark,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📍 Generates the DIGIPIN of a coordinate
    Encode {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// User recorded in the audit log (default: settings)
        #[arg(long)]
        user: Option<String>,
    },

    /// 🔐 Requests consent to validate addresses for a user
    Consent {
        #[arg(long)]
        user: Option<String>,

        /// Consent purpose (default: settings)
        #[arg(long)]
        action: Option<String>,
    },

    /// ✅ Validates an address against a coordinate
    Validate {
        #[arg(long)]
        user: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[command(flatten)]
        address: AddressArgs,

        /// DIGIPIN to verify against the coordinate
        #[arg(long)]
        digipin: Option<String>,

        /// Existing consent; requested on the fly when omitted
        #[arg(long)]
        consent_id: Option<String>,
    },

    /// 🧭 Suggests known addresses similar to the one given
    Suggest {
        #[command(flatten)]
        address: AddressArgs,

        #[arg(long, default_value = "3")]
        max: usize,
    },

    /// 🔎 Shows the status of a validation request
    Status {
        #[arg(long)]
        request_id: String,
    },

    /// 🚫 Revokes a consent
    Revoke {
        #[arg(long)]
        consent_id: String,
    },

    /// 📜 Lists or exports a user's audit trail
    Audit {
        #[arg(long)]
        user: Option<String>,

        #[arg(long, default_value = "100")]
        limit: usize,

        /// Write the entries to this file as JSON instead of listing them
        #[arg(long)]
        export: Option<PathBuf>,
    },
}
