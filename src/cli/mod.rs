//! CLI Module
//!
//! Command-line interface for Inkbook using Clap v4.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::config::Config;

/// Inkbook - Terminal Booking Desk for a Tattoo Studio
#[derive(Parser, Debug)]
#[command(name = "inkbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (writes log files under ~/.inkbook/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive quote wizard (default)
    Quote {
        /// Print the WhatsApp link after the wizard instead of opening a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Manage leads and the studio catalog (PIN-gated)
    Admin {
        /// Admin PIN
        #[arg(long, env = "INKBOOK_ADMIN_PIN", hide_env_values = true, global = true)]
        pin: Option<String>,

        #[command(subcommand)]
        section: AdminCommands,
    },

    /// Initialize configuration and catalog files
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,

        /// Set the admin PIN (only its SHA-256 digest is stored)
        #[arg(long)]
        pin: Option<String>,
    },

    /// Show configuration
    Config,

    /// Database operations
    Db {
        #[command(subcommand)]
        operation: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Quote requests captured by the wizard
    Leads {
        #[command(subcommand)]
        op: LeadCommands,
    },

    /// Public gallery images
    Portfolio {
        #[command(subcommand)]
        op: PortfolioCommands,
    },

    /// Pricing tiers shown on the public page
    Pricing {
        #[command(subcommand)]
        op: PricingCommands,
    },

    /// Promotions (only active ones are public)
    Promotions {
        #[command(subcommand)]
        op: PromotionCommands,
    },

    /// Studio settings (profile, instagram, phone, location)
    Settings {
        #[command(subcommand)]
        op: SettingsCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// List captured leads, newest first
    List,
    /// Move a lead through the pipeline
    Status {
        /// Lead id (or unique prefix)
        id: String,
        #[arg(value_enum)]
        status: LeadStatusArg,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LeadStatusArg {
    Novo,
    Contatado,
    Fechado,
}

#[derive(Subcommand, Debug)]
pub enum PortfolioCommands {
    /// List gallery images
    List,
    /// Add an image
    Add {
        /// Image URL
        image_url: String,
        /// Optional title
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Remove an image
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PricingCommands {
    /// List pricing tiers
    List,
    /// Show the subtitle presets
    Presets,
    /// Add a tier (title and price are required)
    Add {
        title: String,
        price: String,
        #[arg(long, default_value = "")]
        subtitle: String,
        #[arg(long, default_value = "✨")]
        icon: String,
    },
    /// Edit a tier (only the given fields change)
    Edit {
        id: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Remove a tier
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PromotionCommands {
    /// List promotions
    List {
        /// Only the publicly visible (active) ones
        #[arg(long)]
        active: bool,
    },
    /// Add a promotion (title and promo price are required)
    Add {
        title: String,
        promo_price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        original_price: String,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Activate a promotion
    Activate { id: String },
    /// Pause a promotion
    Pause { id: String },
    /// Remove a promotion
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the stored settings
    Show,
    /// Update settings (only the given fields change)
    Set {
        #[arg(long)]
        profile_image_url: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Initialize the database (runs migrations)
    Init,
    /// Show row counts
    Stats,
    /// Clear all captured leads
    Clear {
        /// Skip confirmation prompt (use with caution)
        #[arg(short, long)]
        force: bool,
    },
}

/// Main CLI entry point
pub async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load_from(cli.config.as_deref().map(Path::new))?;

    match cli.command {
        None => commands::cmd_quote(&config, false).await,
        Some(Commands::Quote { no_open }) => commands::cmd_quote(&config, no_open).await,
        Some(Commands::Admin { pin, section }) => {
            commands::cmd_admin(&config, pin, section).await
        }
        Some(Commands::Init { force, pin }) => {
            commands::cmd_init(&config, force, pin, cli.config.as_deref())
        }
        Some(Commands::Config) => commands::cmd_config(&config),
        Some(Commands::Db { operation }) => commands::cmd_db(&config, operation).await,
    }
}
