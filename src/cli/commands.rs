//! CLI command implementations.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};

use super::{
    AdminCommands, DbCommands, LeadCommands, LeadStatusArg, PortfolioCommands, PricingCommands,
    PromotionCommands, SettingsCommands,
};
use crate::auth;
use crate::catalog::Catalog;
use crate::channels::WhatsAppLink;
use crate::config::{Config, SecretString};
use crate::db::{
    Database, LeadRepository, LeadStatus, PortfolioRepository, PricingRepository,
    PromotionRepository, SettingsRepository, SiteSettings, SUBTITLE_PRESETS,
};
use crate::tui;
use crate::utils::{normalize_phone, truncate_str};
use crate::wizard::{LeadStore, QuoteWizard, SubmissionCoordinator};

impl From<LeadStatusArg> for LeadStatus {
    fn from(arg: LeadStatusArg) -> Self {
        match arg {
            LeadStatusArg::Novo => LeadStatus::Novo,
            LeadStatusArg::Contatado => LeadStatus::Contatado,
            LeadStatusArg::Fechado => LeadStatus::Fechado,
        }
    }
}

/// Run the quote wizard: compose the collaborators and hand over to the TUI.
pub async fn cmd_quote(config: &Config, no_open: bool) -> Result<()> {
    Catalog::write_defaults_if_missing();
    let catalog = Catalog::load();

    // The wizard runs fine without a database — leads just aren't captured
    let (store, destination) = match Database::connect(&config.database.path).await {
        Ok(db) => {
            let destination = wizard_destination(config, &db).await;
            let store: Arc<dyn LeadStore> = Arc::new(LeadRepository::new(db));
            (Some(store), destination)
        }
        Err(e) => {
            tracing::warn!("database unavailable, leads will not be captured: {e:#}");
            (None, config.studio.phone_number.clone())
        }
    };

    let mut channel = WhatsAppLink::from_config(&config.whatsapp);
    if no_open {
        channel = channel.print_only();
    }
    let channel = Arc::new(channel);

    let mut coordinator = SubmissionCoordinator::new(channel.clone(), destination);
    if let Some(store) = store {
        coordinator = coordinator.with_store(store);
    }

    let wizard = QuoteWizard::new(catalog);
    tui::run_wizard(wizard, coordinator).await?;

    // In print-only mode the terminal is ours again; show the link now
    if no_open && let Some(url) = channel.last_link() {
        println!("{url}");
    }
    Ok(())
}

/// The wizard's destination number: site settings win over the config file.
async fn wizard_destination(config: &Config, db: &Database) -> String {
    match SettingsRepository::new(db.clone()).get().await {
        Ok(Some(settings)) => {
            let phone = normalize_phone(&settings.phone_number);
            if phone.is_empty() {
                config.studio.phone_number.clone()
            } else {
                phone
            }
        }
        Ok(None) => config.studio.phone_number.clone(),
        Err(e) => {
            tracing::warn!("failed to read site settings: {e:#}");
            config.studio.phone_number.clone()
        }
    }
}

/// Admin dispatch behind the PIN gate.
pub async fn cmd_admin(
    config: &Config,
    pin: Option<String>,
    section: AdminCommands,
) -> Result<()> {
    let pin = pin.map(SecretString::from);
    auth::verify_pin(&config.admin, pin.as_ref()).map_err(|e| anyhow!("{e}"))?;

    let db = Database::connect(&config.database.path).await?;

    match section {
        AdminCommands::Leads { op } => cmd_leads(db, op).await,
        AdminCommands::Portfolio { op } => cmd_portfolio(db, op).await,
        AdminCommands::Pricing { op } => cmd_pricing(db, op).await,
        AdminCommands::Promotions { op } => cmd_promotions(db, op).await,
        AdminCommands::Settings { op } => cmd_settings(config, db, op).await,
    }
}

async fn cmd_leads(db: Database, op: LeadCommands) -> Result<()> {
    let repo = LeadRepository::new(db);
    match op {
        LeadCommands::List => {
            let leads = repo.list().await?;
            if leads.is_empty() {
                println!("Nenhum lead capturado ainda.");
                return Ok(());
            }
            for lead in leads {
                println!(
                    "{}  {}  [{}]  {} / {}  {}",
                    &lead.id[..8],
                    lead.created_at.format("%Y-%m-%d %H:%M"),
                    lead.status.as_str(),
                    lead.body_location.as_deref().unwrap_or("-"),
                    lead.size.as_deref().unwrap_or("-"),
                    truncate_str(&lead.description, 40),
                );
                if !lead.styles.is_empty() {
                    println!("          estilos: {}", lead.styles.join(", "));
                }
            }
            Ok(())
        }
        LeadCommands::Status { id, status } => {
            let full_id = resolve_lead_id(&repo, &id).await?;
            repo.set_status(&full_id, status.into()).await?;
            println!("✔ Lead {} atualizado", &full_id[..8]);
            Ok(())
        }
    }
}

/// Accept a unique id prefix so the artist can paste the short form shown
/// by `leads list`.
async fn resolve_lead_id(repo: &LeadRepository, prefix: &str) -> Result<String> {
    let matches: Vec<String> = repo
        .list()
        .await?
        .into_iter()
        .map(|l| l.id)
        .filter(|id| id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => bail!("nenhum lead com id {prefix}"),
        [id] => Ok(id.clone()),
        many => bail!("{} leads com esse prefixo, use o id completo", many.len()),
    }
}

async fn cmd_portfolio(db: Database, op: PortfolioCommands) -> Result<()> {
    let repo = PortfolioRepository::new(db);
    match op {
        PortfolioCommands::List => {
            for item in repo.list().await? {
                println!("{}  {}  {}", &item.id[..8], item.image_url, item.title);
            }
            Ok(())
        }
        PortfolioCommands::Add { image_url, title } => {
            let item = repo.add(&title, &image_url).await?;
            println!("✔ Imagem adicionada ({})", &item.id[..8]);
            Ok(())
        }
        PortfolioCommands::Remove { id } => {
            if repo.remove(&id).await? {
                println!("✔ Imagem removida");
            } else {
                bail!("imagem {id} não encontrada");
            }
            Ok(())
        }
    }
}

async fn cmd_pricing(db: Database, op: PricingCommands) -> Result<()> {
    let repo = PricingRepository::new(db);
    match op {
        PricingCommands::List => {
            for tier in repo.list().await? {
                println!(
                    "{}  {} {:<12} {:<36} {}",
                    &tier.id[..8],
                    tier.icon,
                    tier.title,
                    tier.subtitle,
                    tier.price
                );
            }
            Ok(())
        }
        PricingCommands::Presets => {
            for preset in SUBTITLE_PRESETS {
                println!("{preset}");
            }
            Ok(())
        }
        PricingCommands::Add {
            title,
            price,
            subtitle,
            icon,
        } => {
            let tier = repo.add(&icon, &title, &subtitle, &price).await?;
            println!("✔ Preço adicionado ({})", &tier.id[..8]);
            Ok(())
        }
        PricingCommands::Edit {
            id,
            icon,
            title,
            subtitle,
            price,
        } => {
            let changed = repo
                .update(
                    &id,
                    icon.as_deref(),
                    title.as_deref(),
                    subtitle.as_deref(),
                    price.as_deref(),
                )
                .await?;
            if !changed {
                bail!("preço {id} não encontrado");
            }
            println!("✔ Atualizado");
            Ok(())
        }
        PricingCommands::Remove { id } => {
            if repo.remove(&id).await? {
                println!("✔ Removido");
            } else {
                bail!("preço {id} não encontrado");
            }
            Ok(())
        }
    }
}

async fn cmd_promotions(db: Database, op: PromotionCommands) -> Result<()> {
    let repo = PromotionRepository::new(db);
    match op {
        PromotionCommands::List { active } => {
            for promo in repo.list(active).await? {
                let state = if promo.active { "ativa" } else { "pausada" };
                println!(
                    "{}  [{}]  {:<24} {} → {}",
                    &promo.id[..8],
                    state,
                    promo.title,
                    promo.original_price,
                    promo.promo_price
                );
            }
            Ok(())
        }
        PromotionCommands::Add {
            title,
            promo_price,
            description,
            original_price,
            image_url,
        } => {
            let promo = repo
                .add(&title, &description, &original_price, &promo_price, &image_url)
                .await?;
            println!("✔ Promoção criada ({})", &promo.id[..8]);
            Ok(())
        }
        PromotionCommands::Activate { id } => {
            if repo.set_active(&id, true).await? {
                println!("✔ Promoção ativada!");
            } else {
                bail!("promoção {id} não encontrada");
            }
            Ok(())
        }
        PromotionCommands::Pause { id } => {
            if repo.set_active(&id, false).await? {
                println!("✔ Promoção pausada.");
            } else {
                bail!("promoção {id} não encontrada");
            }
            Ok(())
        }
        PromotionCommands::Remove { id } => {
            if repo.remove(&id).await? {
                println!("✔ Removida");
            } else {
                bail!("promoção {id} não encontrada");
            }
            Ok(())
        }
    }
}

async fn cmd_settings(config: &Config, db: Database, op: SettingsCommands) -> Result<()> {
    let repo = SettingsRepository::new(db);
    match op {
        SettingsCommands::Show => {
            match repo.get().await? {
                Some(s) => {
                    println!("instagram: {}", s.instagram_handle);
                    println!("telefone:  {}", s.phone_number);
                    println!("local:     {}", s.location);
                    println!("foto:      {}", s.profile_image_url);
                }
                None => println!("Nenhuma configuração salva — usando padrões do config.toml."),
            }
            Ok(())
        }
        SettingsCommands::Set {
            profile_image_url,
            instagram,
            phone,
            location,
        } => {
            // Start from the stored row, falling back to the config defaults
            let mut settings = repo.get().await?.unwrap_or_else(|| SiteSettings {
                profile_image_url: String::new(),
                instagram_handle: config.studio.instagram_handle.clone(),
                phone_number: config.studio.phone_number.clone(),
                location: config.studio.location.clone(),
            });
            if let Some(v) = profile_image_url {
                settings.profile_image_url = v;
            }
            if let Some(v) = instagram {
                settings.instagram_handle = v;
            }
            if let Some(v) = phone {
                settings.phone_number = normalize_phone(&v);
            }
            if let Some(v) = location {
                settings.location = v;
            }
            repo.upsert(&settings).await?;
            println!("✔ Configurações salvas!");
            Ok(())
        }
    }
}

/// Write config and catalog files, optionally setting the admin PIN.
pub fn cmd_init(
    existing: &Config,
    force: bool,
    pin: Option<String>,
    config_path: Option<&str>,
) -> Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_path);

    if path.exists() && !force && pin.is_none() {
        bail!(
            "{} already exists — use --force to overwrite, or --pin to just set the PIN",
            path.display()
        );
    }

    let mut config = if path.exists() && !force {
        existing.clone()
    } else {
        Config::default()
    };
    if let Some(pin) = pin {
        config.admin.pin_sha256 = Some(auth::pin_digest(&SecretString::from(pin)));
        println!("✔ Admin PIN set");
    }

    config.save(&path)?;
    println!("✔ Config written to {}", path.display());

    Catalog::write_defaults_if_missing();
    println!(
        "✔ Catalog at {}",
        crate::config::inkbook_home().join("catalog.toml").display()
    );
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn cmd_config(config: &Config) -> Result<()> {
    print!(
        "{}",
        toml::to_string_pretty(config).context("failed to render config")?
    );
    Ok(())
}

/// Database operations.
pub async fn cmd_db(config: &Config, operation: DbCommands) -> Result<()> {
    match operation {
        DbCommands::Init => {
            Database::connect(&config.database.path).await?;
            println!("✔ Database ready at {}", config.database.path);
            Ok(())
        }
        DbCommands::Stats => {
            let db = Database::connect(&config.database.path).await?;
            let stats = db.stats().await?;
            println!("leads:         {}", stats.leads);
            println!("portfolio:     {}", stats.portfolio);
            println!("pricing_tiers: {}", stats.pricing_tiers);
            println!("promotions:    {}", stats.promotions);
            Ok(())
        }
        DbCommands::Clear { force } => {
            if !force && !confirm("Apagar todos os leads capturados? [y/N] ")? {
                println!("Cancelado.");
                return Ok(());
            }
            let db = Database::connect(&config.database.path).await?;
            let removed = db.clear_leads().await?;
            println!("✔ {removed} lead(s) removido(s)");
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "s" | "S"))
}
