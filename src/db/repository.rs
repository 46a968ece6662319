//! Repositories over the booking-desk tables.
//!
//! Thin async wrappers around the pooled connection; all SQL lives here.
//! `LeadRepository` doubles as the wizard's injected `LeadStore`
//! collaborator.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use super::database::Database;
use super::models::{
    Lead, LeadStatus, NewLead, PortfolioItem, PricingTier, Promotion, SiteSettings,
};
use crate::error::Error;
use crate::wizard::LeadStore;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn styles_from_json(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

// ── Leads ──

#[derive(Clone)]
pub struct LeadRepository {
    db: Database,
}

impl LeadRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a fresh lead with status "novo". Returns the stored row.
    pub async fn insert(&self, lead: &NewLead) -> Result<Lead> {
        let row = Lead {
            id: Uuid::new_v4().to_string(),
            body_location: lead.body_location.clone(),
            size: lead.size.clone(),
            styles: lead.styles.clone(),
            description: lead.description.clone(),
            status: LeadStatus::Novo,
            created_at: Utc::now(),
        };

        let insert = row.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO leads (id, body_location, size, styles, description, status, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        insert.id,
                        insert.body_location,
                        insert.size,
                        serde_json::to_string(&insert.styles).unwrap_or_else(|_| "[]".into()),
                        insert.description,
                        insert.status.as_str(),
                        insert.created_at.to_rfc3339(),
                    ],
                )
            })
            .await?;
        Ok(row)
    }

    /// All leads, newest first.
    pub async fn list(&self) -> Result<Vec<Lead>> {
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, body_location, size, styles, description, status, created_at
                     FROM leads ORDER BY created_at DESC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(Lead {
                        id: row.get(0)?,
                        body_location: row.get(1)?,
                        size: row.get(2)?,
                        styles: styles_from_json(&row.get::<_, String>(3)?),
                        description: row.get(4)?,
                        status: LeadStatus::parse(&row.get::<_, String>(5)?).unwrap_or_default(),
                        created_at: parse_timestamp(&row.get::<_, String>(6)?),
                    })
                })?;
                rows.collect()
            })
            .await
    }

    /// Move a lead through the pipeline. Returns false when the id is
    /// unknown.
    pub async fn set_status(&self, id: &str, status: LeadStatus) -> Result<bool> {
        let id = id.to_string();
        let changed = self
            .db
            .call(move |conn| {
                conn.execute(
                    "UPDATE leads SET status = ?1 WHERE id = ?2",
                    params![status.as_str(), id],
                )
            })
            .await?;
        Ok(changed > 0)
    }
}

#[async_trait]
impl LeadStore for LeadRepository {
    async fn insert_lead(&self, lead: &NewLead) -> Result<(), Error> {
        self.insert(lead)
            .await
            .map(|_| ())
            .map_err(|e| Error::Persistence(format!("{e:#}")))
    }
}

// ── Portfolio ──

#[derive(Clone)]
pub struct PortfolioRepository {
    db: Database,
}

impl PortfolioRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn add(&self, title: &str, image_url: &str) -> Result<PortfolioItem> {
        let item = PortfolioItem {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            image_url: image_url.to_string(),
            created_at: Utc::now(),
        };
        let insert = item.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO portfolio (id, title, image_url, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        insert.id,
                        insert.title,
                        insert.image_url,
                        insert.created_at.to_rfc3339()
                    ],
                )
            })
            .await?;
        Ok(item)
    }

    /// Gallery order: newest first, like the site renders it.
    pub async fn list(&self) -> Result<Vec<PortfolioItem>> {
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, image_url, created_at
                     FROM portfolio ORDER BY created_at DESC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(PortfolioItem {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        image_url: row.get(2)?,
                        created_at: parse_timestamp(&row.get::<_, String>(3)?),
                    })
                })?;
                rows.collect()
            })
            .await
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let changed = self
            .db
            .call(move |conn| conn.execute("DELETE FROM portfolio WHERE id = ?1", params![id]))
            .await?;
        Ok(changed > 0)
    }
}

// ── Pricing tiers ──

#[derive(Clone)]
pub struct PricingRepository {
    db: Database,
}

impl PricingRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Title and price are required — the admin form refuses the row
    /// without them.
    pub async fn add(
        &self,
        icon: &str,
        title: &str,
        subtitle: &str,
        price: &str,
    ) -> Result<PricingTier> {
        if title.trim().is_empty() || price.trim().is_empty() {
            anyhow::bail!("Preencha título e preço");
        }
        let tier = PricingTier {
            id: Uuid::new_v4().to_string(),
            icon: icon.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            price: price.to_string(),
            created_at: Utc::now(),
        };
        let insert = tier.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO pricing_tiers (id, icon, title, subtitle, price, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        insert.id,
                        insert.icon,
                        insert.title,
                        insert.subtitle,
                        insert.price,
                        insert.created_at.to_rfc3339()
                    ],
                )
            })
            .await?;
        Ok(tier)
    }

    pub async fn list(&self) -> Result<Vec<PricingTier>> {
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, icon, title, subtitle, price, created_at
                     FROM pricing_tiers ORDER BY created_at ASC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(PricingTier {
                        id: row.get(0)?,
                        icon: row.get(1)?,
                        title: row.get(2)?,
                        subtitle: row.get(3)?,
                        price: row.get(4)?,
                        created_at: parse_timestamp(&row.get::<_, String>(5)?),
                    })
                })?;
                rows.collect()
            })
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        icon: Option<&str>,
        title: Option<&str>,
        subtitle: Option<&str>,
        price: Option<&str>,
    ) -> Result<bool> {
        let id = id.to_string();
        let icon = icon.map(str::to_string);
        let title = title.map(str::to_string);
        let subtitle = subtitle.map(str::to_string);
        let price = price.map(str::to_string);
        let changed = self
            .db
            .call(move |conn| {
                conn.execute(
                    "UPDATE pricing_tiers SET
                        icon = COALESCE(?1, icon),
                        title = COALESCE(?2, title),
                        subtitle = COALESCE(?3, subtitle),
                        price = COALESCE(?4, price)
                     WHERE id = ?5",
                    params![icon, title, subtitle, price, id],
                )
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let changed = self
            .db
            .call(move |conn| conn.execute("DELETE FROM pricing_tiers WHERE id = ?1", params![id]))
            .await?;
        Ok(changed > 0)
    }
}

// ── Promotions ──

#[derive(Clone)]
pub struct PromotionRepository {
    db: Database,
}

impl PromotionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn add(
        &self,
        title: &str,
        description: &str,
        original_price: &str,
        promo_price: &str,
        image_url: &str,
    ) -> Result<Promotion> {
        if title.trim().is_empty() || promo_price.trim().is_empty() {
            anyhow::bail!("Título e preço são obrigatórios");
        }
        let promo = Promotion {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            original_price: original_price.to_string(),
            promo_price: promo_price.to_string(),
            image_url: image_url.to_string(),
            active: true,
            created_at: Utc::now(),
        };
        let insert = promo.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO promotions
                        (id, title, description, original_price, promo_price, image_url, active, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        insert.id,
                        insert.title,
                        insert.description,
                        insert.original_price,
                        insert.promo_price,
                        insert.image_url,
                        insert.active,
                        insert.created_at.to_rfc3339()
                    ],
                )
            })
            .await?;
        Ok(promo)
    }

    /// All promotions; `active_only` narrows to the publicly visible ones.
    pub async fn list(&self, active_only: bool) -> Result<Vec<Promotion>> {
        self.db
            .call(move |conn| {
                let sql = if active_only {
                    "SELECT id, title, description, original_price, promo_price, image_url, active, created_at
                     FROM promotions WHERE active = 1 ORDER BY created_at DESC"
                } else {
                    "SELECT id, title, description, original_price, promo_price, image_url, active, created_at
                     FROM promotions ORDER BY created_at DESC"
                };
                let mut stmt = conn.prepare(sql)?;
                let rows = stmt.query_map([], |row| {
                    Ok(Promotion {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        original_price: row.get(3)?,
                        promo_price: row.get(4)?,
                        image_url: row.get(5)?,
                        active: row.get(6)?,
                        created_at: parse_timestamp(&row.get::<_, String>(7)?),
                    })
                })?;
                rows.collect()
            })
            .await
    }

    /// Activate or pause a promotion.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool> {
        let id = id.to_string();
        let changed = self
            .db
            .call(move |conn| {
                conn.execute(
                    "UPDATE promotions SET active = ?1 WHERE id = ?2",
                    params![active, id],
                )
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let changed = self
            .db
            .call(move |conn| conn.execute("DELETE FROM promotions WHERE id = ?1", params![id]))
            .await?;
        Ok(changed > 0)
    }
}

// ── Site settings ──

#[derive(Clone)]
pub struct SettingsRepository {
    db: Database,
}

impl SettingsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get(&self) -> Result<Option<SiteSettings>> {
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT profile_image_url, instagram_handle, phone_number, location
                     FROM site_settings WHERE id = 1",
                )?;
                let mut rows = stmt.query_map([], |row| {
                    Ok(SiteSettings {
                        profile_image_url: row.get(0)?,
                        instagram_handle: row.get(1)?,
                        phone_number: row.get(2)?,
                        location: row.get(3)?,
                    })
                })?;
                rows.next().transpose()
            })
            .await
    }

    /// Create-or-update the single settings row.
    pub async fn upsert(&self, settings: &SiteSettings) -> Result<()> {
        let s = settings.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO site_settings (id, profile_image_url, instagram_handle, phone_number, location)
                     VALUES (1, ?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        profile_image_url = excluded.profile_image_url,
                        instagram_handle = excluded.instagram_handle,
                        phone_number = excluded.phone_number,
                        location = excluded.location",
                    params![s.profile_image_url, s.instagram_handle, s.phone_number, s.location],
                )
            })
            .await?;
        Ok(())
    }
}
