pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::command::*;

#[cfg(feature = "cli")]
mod command {
    use super::settings::Overrides;
    use crate::domain::model::{OfferKind, UserRole};
    use clap::{Args, Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "easytips")]
    #[command(about = "Terminal client for the Easy Tips freight marketplace")]
    pub struct CliConfig {
        /// Base URL of the marketplace API
        #[arg(long, global = true)]
        pub api_url: Option<String>,

        /// Path to a TOML configuration file
        #[arg(long, global = true)]
        pub config: Option<String>,

        /// Path of the local storage file holding the token
        #[arg(long, global = true)]
        pub storage: Option<String>,

        /// Request timeout in seconds
        #[arg(long, global = true)]
        pub timeout: Option<u64>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, value_enum, default_value = "compact")]
        pub log_format: LogFormat,

        #[command(subcommand)]
        pub command: Command,
    }

    impl CliConfig {
        pub fn overrides(&self) -> Overrides {
            Overrides {
                api_url: self.api_url.clone(),
                storage: self.storage.clone(),
                timeout_seconds: self.timeout,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum LogFormat {
        Compact,
        Json,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Render the page at a route path (e.g. /dashboard, /driver/feed)
        Open { path: String },
        /// Create an account
        Register {
            #[arg(long)]
            name: String,
            #[arg(long)]
            email: String,
            #[arg(long)]
            password: String,
            #[arg(long, default_value = "BOTH")]
            role: UserRole,
        },
        /// Log in and keep the access token in local storage
        Login {
            #[arg(long)]
            email: String,
            #[arg(long)]
            password: String,
        },
        /// Forget the stored access token
        Logout,
        /// Show the logged-in account
        Me,
        /// Shipper pages
        #[command(subcommand)]
        Shipper(ShipperCommand),
        /// Driver pages
        #[command(subcommand)]
        Driver(DriverCommand),
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum ShipperCommand {
        /// List my services
        Services,
        /// Publish a new service
        New(NewServiceArgs),
        /// List the offers received by a service
        Offers { service_id: i64 },
        /// Accept a counter-offer received by a service
        Accept { service_id: i64, offer_id: i64 },
        /// Edit a service still open for negotiation
        Edit {
            service_id: i64,
            #[arg(long)]
            title: Option<String>,
            #[arg(long)]
            description: Option<String>,
            #[arg(long)]
            price: Option<f64>,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct NewServiceArgs {
        #[arg(long, default_value = "")]
        pub title: String,
        #[arg(long, default_value = "")]
        pub description: String,
        #[arg(long, default_value = "LOTACAO")]
        pub service_type: String,
        #[arg(long, default_value = "")]
        pub origin: String,
        #[arg(long, default_value_t = -23.55, allow_hyphen_values = true)]
        pub origin_lat: f64,
        #[arg(long, default_value_t = -46.63, allow_hyphen_values = true)]
        pub origin_lng: f64,
        #[arg(long, default_value = "")]
        pub dest: String,
        #[arg(long, default_value_t = -22.9, allow_hyphen_values = true)]
        pub dest_lat: f64,
        #[arg(long, default_value_t = -47.06, allow_hyphen_values = true)]
        pub dest_lng: f64,
        #[arg(long, default_value_t = 1000.0)]
        pub price: f64,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum DriverCommand {
        /// Published services, optionally near a point
        Feed {
            #[arg(long, allow_hyphen_values = true, requires = "near_lng")]
            near_lat: Option<f64>,
            #[arg(long, allow_hyphen_values = true, requires = "near_lat")]
            near_lng: Option<f64>,
            #[arg(long)]
            radius_km: Option<f64>,
        },
        /// Accept a service or send a counter-offer
        Offer {
            service_id: i64,
            #[arg(long)]
            kind: OfferKind,
            #[arg(long, default_value_t = 0.0)]
            price: f64,
            #[arg(long, default_value = "")]
            message: String,
        },
        /// State the intended final destination
        Intent {
            #[arg(long)]
            address: Option<String>,
            #[arg(long, allow_hyphen_values = true)]
            lat: Option<f64>,
            #[arg(long, allow_hyphen_values = true)]
            lng: Option<f64>,
        },
        /// Current assignment and backhaul suggestions
        Assignment,
        /// Mark the current assignment as collected
        Collect,
        /// Mark the current assignment as delivered
        Deliver,
    }
}
