//! Core PlaceStore implementation

use std::path::Path;

use rusqlite::{Connection, Row, params, params_from_iter};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::{
    Category, ContactMessage, Duration, Governorate, Place, SavedPlace, TripPlan, TripPlanEntry, TripStatus,
};
use crate::now_ms;

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Sort order for place listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending priority, featured first within a priority (site default)
    #[default]
    Priority,
    /// Arabic name
    Name,
    /// Governorate name
    Governorate,
    /// Most viewed first
    Popular,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "name" => Ok(Self::Name),
            "governorate" => Ok(Self::Governorate),
            "popular" => Ok(Self::Popular),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Filters for a place listing query
#[derive(Debug, Clone, Default)]
pub struct PlaceQuery {
    pub category_slug: Option<String>,
    pub governorate_slug: Option<String>,
    /// Substring match over names, descriptions and cities (both languages)
    pub search: Option<String>,
    pub sort: SortKey,
    pub limit: Option<u32>,
}

impl PlaceQuery {
    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = Some(slug.into());
        self
    }

    pub fn governorate(mut self, slug: impl Into<String>) -> Self {
        self.governorate_slug = Some(slug.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Outcome of toggling a saved place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Removed,
}

/// Site-wide content counts
#[derive(Debug, Clone, Copy)]
pub struct CatalogStats {
    pub total_places: u64,
    pub total_governorates: u64,
    pub total_categories: u64,
}

/// A governorate together with its active place count
#[derive(Debug, Clone)]
pub struct GovernorateSummary {
    pub governorate: Governorate,
    pub place_count: u64,
}

/// The catalog store, one SQLite database file
pub struct PlaceStore {
    conn: Connection,
}

impl PlaceStore {
    /// Open or create the catalog database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "foreign_keys", true)?;
        crate::schema::init(&conn)?;
        debug!(path = %path.as_ref().display(), "Opened place store");
        Ok(Self { conn })
    }

    /// Open an in-memory catalog (tests and scratch use)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        crate::schema::init(&conn)?;
        Ok(Self { conn })
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Insert a category, generating its slug when not set. Returns the id.
    pub fn insert_category(&self, category: &Category) -> Result<i64> {
        let slug = category.effective_slug();
        self.conn
            .execute(
                "INSERT INTO categories (name_ar, name_en, slug, description_ar, description_en, icon, ord, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    category.name.ar,
                    category.name.en,
                    slug,
                    category.description.ar,
                    category.description.en,
                    category.icon,
                    category.order,
                    category.is_active,
                    category.created_at,
                    category.updated_at,
                ],
            )
            .map_err(|e| slug_conflict(e, &slug))?;
        let id = self.conn.last_insert_rowid();
        info!(id, slug = %slug, "Inserted category");
        Ok(id)
    }

    /// Active categories in display order
    pub fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM categories WHERE is_active = 1 ORDER BY ord, name_ar")?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Look up an active category by slug
    pub fn category_by_slug(&self, slug: &str) -> Result<Category> {
        self.conn
            .query_row(
                "SELECT * FROM categories WHERE slug = ?1 AND is_active = 1",
                params![slug],
                category_from_row,
            )
            .map_err(|e| not_found(e, &format!("category: {}", slug)))
    }

    /// Count of active places in a category
    pub fn category_place_count(&self, category_id: i64) -> Result<u64> {
        let count: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM places WHERE category_id = ?1 AND is_active = 1",
            params![category_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Governorates
    // ------------------------------------------------------------------

    pub fn insert_governorate(&self, governorate: &Governorate) -> Result<i64> {
        let slug = governorate.effective_slug();
        self.conn
            .execute(
                "INSERT INTO governorates (name_ar, name_en, slug, is_active) VALUES (?1, ?2, ?3, ?4)",
                params![governorate.name.ar, governorate.name.en, slug, governorate.is_active],
            )
            .map_err(|e| slug_conflict(e, &slug))?;
        let id = self.conn.last_insert_rowid();
        info!(id, slug = %slug, "Inserted governorate");
        Ok(id)
    }

    /// Active governorates ordered by name
    pub fn governorates(&self) -> Result<Vec<Governorate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM governorates WHERE is_active = 1 ORDER BY name_ar")?;
        let rows = stmt.query_map([], governorate_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn governorate_by_slug(&self, slug: &str) -> Result<Governorate> {
        self.conn
            .query_row(
                "SELECT * FROM governorates WHERE slug = ?1 AND is_active = 1",
                params![slug],
                governorate_from_row,
            )
            .map_err(|e| not_found(e, &format!("governorate: {}", slug)))
    }

    /// Active governorates that have at least one active place
    pub fn governorates_with_places(&self) -> Result<Vec<GovernorateSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.*, COUNT(p.id) AS place_count
             FROM governorates g
             JOIN places p ON p.governorate_id = g.id AND p.is_active = 1
             WHERE g.is_active = 1
             GROUP BY g.id
             ORDER BY g.name_ar",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(GovernorateSummary {
                governorate: governorate_from_row(row)?,
                place_count: row.get("place_count")?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ------------------------------------------------------------------
    // Places
    // ------------------------------------------------------------------

    pub fn insert_place(&self, place: &Place) -> Result<i64> {
        let slug = place.effective_slug();
        self.conn
            .execute(
                "INSERT INTO places (name_ar, name_en, slug, category_id, governorate_id,
                    city_ar, city_en, short_description_ar, short_description_en,
                    description_ar, description_en, latitude, longitude, suggested_duration,
                    visitor_tips_ar, visitor_tips_en, best_time_ar, best_time_en,
                    entry_fee_ar, entry_fee_en, priority, is_featured, is_active, view_count,
                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                         ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
                params![
                    place.name.ar,
                    place.name.en,
                    slug,
                    place.category_id,
                    place.governorate_id,
                    place.city.ar,
                    place.city.en,
                    place.short_description.ar,
                    place.short_description.en,
                    place.description.ar,
                    place.description.en,
                    place.latitude,
                    place.longitude,
                    place.suggested_duration.hours(),
                    place.visitor_tips.ar,
                    place.visitor_tips.en,
                    place.best_time_to_visit.ar,
                    place.best_time_to_visit.en,
                    place.entry_fee.ar,
                    place.entry_fee.en,
                    place.priority,
                    place.is_featured,
                    place.is_active,
                    place.view_count,
                    place.created_at,
                    place.updated_at,
                ],
            )
            .map_err(|e| slug_conflict(e, &slug))?;
        let id = self.conn.last_insert_rowid();
        info!(id, slug = %slug, "Inserted place");
        Ok(id)
    }

    /// Active places matching the query filters
    pub fn places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        let mut sql = String::from(
            "SELECT p.* FROM places p
             JOIN categories c ON c.id = p.category_id
             JOIN governorates g ON g.id = p.governorate_id
             WHERE p.is_active = 1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(slug) = &query.category_slug {
            sql.push_str(" AND c.slug = ?");
            args.push(Box::new(slug.clone()));
        }
        if let Some(slug) = &query.governorate_slug {
            sql.push_str(" AND g.slug = ?");
            args.push(Box::new(slug.clone()));
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search);
            sql.push_str(
                " AND (p.name_ar LIKE ? OR p.name_en LIKE ?
                   OR p.description_ar LIKE ? OR p.description_en LIKE ?
                   OR p.city_ar LIKE ? OR p.city_en LIKE ?)",
            );
            for _ in 0..6 {
                args.push(Box::new(pattern.clone()));
            }
        }

        sql.push_str(match query.sort {
            SortKey::Priority => " ORDER BY p.priority, p.is_featured DESC, p.name_ar",
            SortKey::Name => " ORDER BY p.name_ar",
            SortKey::Governorate => " ORDER BY g.name_ar, p.priority",
            SortKey::Popular => " ORDER BY p.view_count DESC",
        });

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            args.push(Box::new(limit));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter().map(|a| a.as_ref())), place_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Featured active places, best priority first
    pub fn featured_places(&self, limit: u32) -> Result<Vec<Place>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM places WHERE is_active = 1 AND is_featured = 1
             ORDER BY priority, name_ar LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], place_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn place_by_slug(&self, slug: &str) -> Result<Place> {
        self.conn
            .query_row(
                "SELECT * FROM places WHERE slug = ?1 AND is_active = 1",
                params![slug],
                place_from_row,
            )
            .map_err(|e| not_found(e, &format!("place: {}", slug)))
    }

    pub fn place_by_id(&self, id: i64) -> Result<Place> {
        self.conn
            .query_row(
                "SELECT * FROM places WHERE id = ?1",
                params![id],
                place_from_row,
            )
            .map_err(|e| not_found(e, &format!("place id: {}", id)))
    }

    /// Active places sharing the category, excluding the place itself
    pub fn related_places(&self, place: &Place, limit: u32) -> Result<Vec<Place>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM places WHERE is_active = 1 AND category_id = ?1 AND id != ?2
             ORDER BY priority, name_ar LIMIT ?3",
        )?;
        let rows = stmt.query_map(params![place.category_id, place.id, limit], place_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The itinerary generator's catalog query: active places in any of the
    /// given categories, ordered by ascending priority (ties by insertion
    /// order, which keeps the ordering stable across identical calls).
    pub fn active_places_in_categories(&self, category_ids: &[i64]) -> Result<Vec<Place>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; category_ids.len()].join(",");
        let sql = format!(
            "SELECT * FROM places WHERE is_active = 1 AND category_id IN ({})
             ORDER BY priority, id",
            placeholders
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(category_ids.iter()), place_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Record one more view of a place
    pub fn increment_views(&self, place_id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE places SET view_count = view_count + 1 WHERE id = ?1",
            params![place_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("place id: {}", place_id)));
        }
        Ok(())
    }

    /// Site-wide counts of active content
    pub fn stats(&self) -> Result<CatalogStats> {
        let count = |sql: &str| -> Result<u64> { Ok(self.conn.query_row(sql, [], |row| row.get(0))?) };
        Ok(CatalogStats {
            total_places: count("SELECT COUNT(*) FROM places WHERE is_active = 1")?,
            total_governorates: count("SELECT COUNT(*) FROM governorates WHERE is_active = 1")?,
            total_categories: count("SELECT COUNT(*) FROM categories WHERE is_active = 1")?,
        })
    }

    // ------------------------------------------------------------------
    // Contact messages
    // ------------------------------------------------------------------

    pub fn insert_contact(&self, message: &ContactMessage) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO contact_messages (name, email, phone, subject, message, place_id, is_read, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                message.name,
                message.email,
                message.phone,
                message.subject,
                message.message,
                message.place_id,
                message.is_read,
                message.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, "Stored contact message");
        Ok(id)
    }

    /// Contact messages, newest first
    pub fn contact_messages(&self, unread_only: bool) -> Result<Vec<ContactMessage>> {
        let sql = if unread_only {
            "SELECT * FROM contact_messages WHERE is_read = 0 ORDER BY created_at DESC"
        } else {
            "SELECT * FROM contact_messages ORDER BY created_at DESC"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], contact_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn mark_contact_read(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("UPDATE contact_messages SET is_read = 1 WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("contact message id: {}", id)));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Saved places
    // ------------------------------------------------------------------

    /// Save a place for a user, or remove it when already saved
    pub fn toggle_saved(&self, user: &str, place_id: i64) -> Result<SaveOutcome> {
        let removed = self.conn.execute(
            "DELETE FROM saved_places WHERE user = ?1 AND place_id = ?2",
            params![user, place_id],
        )?;
        if removed > 0 {
            debug!(user, place_id, "Removed saved place");
            return Ok(SaveOutcome::Removed);
        }
        self.conn.execute(
            "INSERT INTO saved_places (user, place_id, notes, created_at) VALUES (?1, ?2, '', ?3)",
            params![user, place_id, now_ms()],
        )?;
        debug!(user, place_id, "Saved place");
        Ok(SaveOutcome::Saved)
    }

    /// A user's saved places with the place records, newest first
    pub fn saved_places(&self, user: &str) -> Result<Vec<(SavedPlace, Place)>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id AS saved_id, s.user, s.notes, s.created_at AS saved_at, p.*
             FROM saved_places s
             JOIN places p ON p.id = s.place_id
             WHERE s.user = ?1
             ORDER BY s.created_at DESC",
        )?;
        let rows = stmt.query_map(params![user], |row| {
            let saved = SavedPlace {
                id: row.get("saved_id")?,
                user: row.get("user")?,
                place_id: row.get("id")?,
                notes: row.get("notes")?,
                created_at: row.get("saved_at")?,
            };
            Ok((saved, place_from_row(row)?))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ------------------------------------------------------------------
    // Trip plans
    // ------------------------------------------------------------------

    pub fn create_trip_plan(&self, plan: &TripPlan) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO trip_plans (user, title, description, start_date, end_date, budget, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                plan.user,
                plan.title,
                plan.description,
                plan.start_date.map(|d| d.to_string()),
                plan.end_date.map(|d| d.to_string()),
                plan.budget,
                plan.status.to_string(),
                plan.created_at,
                plan.updated_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, user = %plan.user, "Created trip plan");
        Ok(id)
    }

    /// A user's trip plans, newest first
    pub fn trip_plans(&self, user: &str) -> Result<Vec<TripPlan>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM trip_plans WHERE user = ?1 ORDER BY created_at DESC")?;
        let rows = stmt.query_map(params![user], plan_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// A single trip plan, scoped to its owner
    pub fn trip_plan(&self, user: &str, plan_id: i64) -> Result<TripPlan> {
        self.conn
            .query_row(
                "SELECT * FROM trip_plans WHERE id = ?1 AND user = ?2",
                params![plan_id, user],
                plan_from_row,
            )
            .map_err(|e| not_found(e, &format!("trip plan id: {}", plan_id)))
    }

    /// Entries of a plan ordered by day
    pub fn trip_plan_entries(&self, plan_id: i64) -> Result<Vec<TripPlanEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM trip_plan_entries WHERE plan_id = ?1 ORDER BY day_number, id")?;
        let rows = stmt.query_map(params![plan_id], entry_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Add a place to a day of a plan. Returns false when the same place is
    /// already scheduled on that day.
    pub fn add_place_to_plan(&self, plan_id: i64, place_id: i64, day_number: u32) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO trip_plan_entries (plan_id, place_id, day_number) VALUES (?1, ?2, ?3)",
            params![plan_id, place_id, day_number],
        )?;
        Ok(inserted > 0)
    }

    pub fn remove_plan_entry(&self, plan_id: i64, entry_id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM trip_plan_entries WHERE id = ?1 AND plan_id = ?2",
            params![entry_id, plan_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("trip plan entry id: {}", entry_id)));
        }
        Ok(())
    }

    /// Delete a plan and its entries
    pub fn delete_trip_plan(&self, user: &str, plan_id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM trip_plans WHERE id = ?1 AND user = ?2",
            params![plan_id, user],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("trip plan id: {}", plan_id)));
        }
        info!(plan_id, user, "Deleted trip plan");
        Ok(())
    }
}

// ----------------------------------------------------------------------
// Row mapping
// ----------------------------------------------------------------------

fn bilingual(row: &Row<'_>, ar: &str, en: &str) -> rusqlite::Result<crate::BilingualText> {
    Ok(crate::BilingualText {
        ar: row.get(ar)?,
        en: row.get(en)?,
    })
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: bilingual(row, "name_ar", "name_en")?,
        slug: row.get("slug")?,
        description: bilingual(row, "description_ar", "description_en")?,
        icon: row.get("icon")?,
        order: row.get("ord")?,
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn governorate_from_row(row: &Row<'_>) -> rusqlite::Result<Governorate> {
    Ok(Governorate {
        id: row.get("id")?,
        name: bilingual(row, "name_ar", "name_en")?,
        slug: row.get("slug")?,
        is_active: row.get("is_active")?,
    })
}

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    let hours: u32 = row.get("suggested_duration")?;
    let suggested_duration = Duration::from_hours(hours).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            format!("invalid suggested_duration: {}", hours).into(),
        )
    })?;
    Ok(Place {
        id: row.get("id")?,
        name: bilingual(row, "name_ar", "name_en")?,
        slug: row.get("slug")?,
        category_id: row.get("category_id")?,
        governorate_id: row.get("governorate_id")?,
        city: bilingual(row, "city_ar", "city_en")?,
        short_description: bilingual(row, "short_description_ar", "short_description_en")?,
        description: bilingual(row, "description_ar", "description_en")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        suggested_duration,
        visitor_tips: bilingual(row, "visitor_tips_ar", "visitor_tips_en")?,
        best_time_to_visit: bilingual(row, "best_time_ar", "best_time_en")?,
        entry_fee: bilingual(row, "entry_fee_ar", "entry_fee_en")?,
        priority: row.get("priority")?,
        is_featured: row.get("is_featured")?,
        is_active: row.get("is_active")?,
        view_count: row.get("view_count")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        subject: row.get("subject")?,
        message: row.get("message")?,
        place_id: row.get("place_id")?,
        is_read: row.get("is_read")?,
        created_at: row.get("created_at")?,
    })
}

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<TripPlan> {
    let status_text: String = row.get("status")?;
    let status: TripStatus = status_text.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e.into())
    })?;
    Ok(TripPlan {
        id: row.get("id")?,
        user: row.get("user")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start_date: parse_opt(row.get::<_, Option<String>>("start_date")?),
        end_date: parse_opt(row.get::<_, Option<String>>("end_date")?),
        budget: row.get("budget")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<TripPlanEntry> {
    Ok(TripPlanEntry {
        id: row.get("id")?,
        plan_id: row.get("plan_id")?,
        place_id: row.get("place_id")?,
        day_number: row.get("day_number")?,
        visit_time: parse_opt(row.get::<_, Option<String>>("visit_time")?),
        notes: row.get("notes")?,
        is_completed: row.get("is_completed")?,
    })
}

fn parse_opt<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}

fn slug_conflict(err: rusqlite::Error, slug: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::DuplicateSlug(slug.to_string());
        }
    }
    StoreError::Sqlite(err)
}

fn not_found(err: rusqlite::Error, what: &str) -> StoreError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(what.to_string()),
        other => StoreError::Sqlite(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, PlaceStore) {
        let temp = TempDir::new().unwrap();
        let store = PlaceStore::open(temp.path().join("catalog.db")).unwrap();
        (temp, store)
    }

    /// One category, one governorate, three places
    fn seed_basic(store: &PlaceStore) -> (i64, i64) {
        let cat = store
            .insert_category(&Category::new("السياحة الفرعونية", "Pharaonic Tourism"))
            .unwrap();
        let gov = store.insert_governorate(&Governorate::new("القاهرة", "Cairo")).unwrap();

        store
            .insert_place(
                &Place::new("الأهرامات", "Pyramids of Giza", cat, gov)
                    .with_priority(1)
                    .with_duration(Duration::FourHours)
                    .featured(),
            )
            .unwrap();
        store
            .insert_place(
                &Place::new("المتحف المصري", "Egyptian Museum", cat, gov)
                    .with_priority(2)
                    .with_duration(Duration::ThreeHours),
            )
            .unwrap();
        store
            .insert_place(
                &Place::new("قلعة صلاح الدين", "Saladin Citadel", cat, gov)
                    .with_priority(3)
                    .with_duration(Duration::TwoHours),
            )
            .unwrap();
        (cat, gov)
    }

    #[test]
    fn test_slug_generated_on_insert() {
        let (_temp, store) = test_store();
        let id = store
            .insert_category(&Category::new("سياحة", "Test Category New"))
            .unwrap();
        assert!(id > 0);

        let category = store.category_by_slug("test-category-new").unwrap();
        assert_eq!(category.name.en, "Test Category New");
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let (_temp, store) = test_store();
        store.insert_governorate(&Governorate::new("القاهرة", "Cairo")).unwrap();
        let err = store
            .insert_governorate(&Governorate::new("القاهرة", "Cairo"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(slug) if slug == "cairo"));
    }

    #[test]
    fn test_categories_ordered_by_position() {
        let (_temp, store) = test_store();
        store
            .insert_category(&Category::new("ب", "Second").with_order(2))
            .unwrap();
        store.insert_category(&Category::new("أ", "First").with_order(1)).unwrap();

        let categories = store.categories().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name.en, "First");
    }

    #[test]
    fn test_place_by_slug_and_not_found() {
        let (_temp, store) = test_store();
        seed_basic(&store);

        let place = store.place_by_slug("pyramids-of-giza").unwrap();
        assert_eq!(place.name.ar, "الأهرامات");
        assert_eq!(place.suggested_duration, Duration::FourHours);

        let err = store.place_by_slug("atlantis").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_places_query_filters_and_search() {
        let (_temp, store) = test_store();
        let (_cat, gov) = seed_basic(&store);
        let other_cat = store
            .insert_category(&Category::new("سياحة شاطئية", "Beach Tourism"))
            .unwrap();
        store
            .insert_place(&Place::new("شرم الشيخ", "Sharm El Sheikh", other_cat, gov))
            .unwrap();

        let all = store.places(&PlaceQuery::default()).unwrap();
        assert_eq!(all.len(), 4);

        let pharaonic = store
            .places(&PlaceQuery::default().category("pharaonic-tourism"))
            .unwrap();
        assert_eq!(pharaonic.len(), 3);

        let searched = store.places(&PlaceQuery::default().search("Museum")).unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].slug, "egyptian-museum");

        let limited = store.places(&PlaceQuery::default().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_places_sorted_by_popularity() {
        let (_temp, store) = test_store();
        seed_basic(&store);
        let museum = store.place_by_slug("egyptian-museum").unwrap();
        for _ in 0..5 {
            store.increment_views(museum.id).unwrap();
        }

        let popular = store.places(&PlaceQuery::default().sort(SortKey::Popular)).unwrap();
        assert_eq!(popular[0].slug, "egyptian-museum");
        assert_eq!(popular[0].view_count, 5);
    }

    #[test]
    fn test_featured_and_related() {
        let (_temp, store) = test_store();
        seed_basic(&store);

        let featured = store.featured_places(6).unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "pyramids-of-giza");

        let pyramids = store.place_by_slug("pyramids-of-giza").unwrap();
        let related = store.related_places(&pyramids, 4).unwrap();
        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|p| p.id != pyramids.id));
    }

    #[test]
    fn test_active_places_in_categories_ordering() {
        let (_temp, store) = test_store();
        let (cat, gov) = seed_basic(&store);
        let other_cat = store
            .insert_category(&Category::new("سياحة إسلامية", "Islamic Tourism"))
            .unwrap();
        store
            .insert_place(&Place::new("مسجد", "Al-Azhar Mosque", other_cat, gov).with_priority(1))
            .unwrap();

        let places = store.active_places_in_categories(&[cat, other_cat]).unwrap();
        assert_eq!(places.len(), 4);
        // Priority ascending, earlier insert first on ties
        assert_eq!(places[0].slug, "pyramids-of-giza");
        assert_eq!(places[1].slug, "al-azhar-mosque");
        let priorities: Vec<u8> = places.iter().map(|p| p.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);

        // Only the requested categories appear
        let only_islamic = store.active_places_in_categories(&[other_cat]).unwrap();
        assert_eq!(only_islamic.len(), 1);

        assert!(store.active_places_in_categories(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let (_temp, store) = test_store();
        seed_basic(&store);

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_places, 3);
        assert_eq!(stats.total_governorates, 1);
        assert_eq!(stats.total_categories, 1);
    }

    #[test]
    fn test_governorates_with_places() {
        let (_temp, store) = test_store();
        seed_basic(&store);
        // A governorate with no places should not appear
        store.insert_governorate(&Governorate::new("أسوان", "Aswan")).unwrap();

        let summaries = store.governorates_with_places().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].governorate.slug, "cairo");
        assert_eq!(summaries[0].place_count, 3);
    }

    #[test]
    fn test_contact_messages() {
        let (_temp, store) = test_store();
        let id = store
            .insert_contact(
                &ContactMessage::new("Mona", "mona@example.com", "Question", "Opening hours?").with_phone("0100000000"),
            )
            .unwrap();

        let unread = store.contact_messages(true).unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].phone.as_deref(), Some("0100000000"));

        store.mark_contact_read(id).unwrap();
        assert!(store.contact_messages(true).unwrap().is_empty());
        assert_eq!(store.contact_messages(false).unwrap().len(), 1);
    }

    #[test]
    fn test_toggle_saved() {
        let (_temp, store) = test_store();
        seed_basic(&store);
        let place = store.place_by_slug("pyramids-of-giza").unwrap();

        assert_eq!(store.toggle_saved("amira", place.id).unwrap(), SaveOutcome::Saved);
        assert_eq!(store.saved_places("amira").unwrap().len(), 1);

        assert_eq!(store.toggle_saved("amira", place.id).unwrap(), SaveOutcome::Removed);
        assert!(store.saved_places("amira").unwrap().is_empty());
    }

    #[test]
    fn test_trip_plan_lifecycle() {
        let (_temp, store) = test_store();
        seed_basic(&store);
        let pyramids = store.place_by_slug("pyramids-of-giza").unwrap();
        let museum = store.place_by_slug("egyptian-museum").unwrap();

        let plan_id = store
            .create_trip_plan(&TripPlan::new("amira", "Cairo Weekend").with_description("Two days in Cairo"))
            .unwrap();

        assert!(store.add_place_to_plan(plan_id, pyramids.id, 1).unwrap());
        assert!(store.add_place_to_plan(plan_id, museum.id, 2).unwrap());
        // Same place on the same day is a no-op
        assert!(!store.add_place_to_plan(plan_id, pyramids.id, 1).unwrap());

        let entries = store.trip_plan_entries(plan_id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day_number, 1);

        store.remove_plan_entry(plan_id, entries[0].id).unwrap();
        assert_eq!(store.trip_plan_entries(plan_id).unwrap().len(), 1);

        let plans = store.trip_plans("amira").unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].status, TripStatus::Draft);

        store.delete_trip_plan("amira", plan_id).unwrap();
        assert!(store.trip_plans("amira").unwrap().is_empty());
        // Entries go with the plan
        assert!(store.trip_plan_entries(plan_id).unwrap().is_empty());
    }

    #[test]
    fn test_trip_plan_scoped_to_owner() {
        let (_temp, store) = test_store();
        let plan_id = store.create_trip_plan(&TripPlan::new("amira", "Solo Trip")).unwrap();

        assert!(store.trip_plan("someone-else", plan_id).unwrap_err().is_not_found());
        assert!(store.delete_trip_plan("someone-else", plan_id).unwrap_err().is_not_found());
        assert!(store.trip_plan("amira", plan_id).is_ok());
    }

    #[test]
    fn test_inactive_places_hidden() {
        let (_temp, store) = test_store();
        let (cat, gov) = seed_basic(&store);
        let mut hidden = Place::new("مغلق", "Closed Site", cat, gov);
        hidden.is_active = false;
        store.insert_place(&hidden).unwrap();

        assert!(store.place_by_slug("closed-site").unwrap_err().is_not_found());
        assert_eq!(store.places(&PlaceQuery::default()).unwrap().len(), 3);
        assert_eq!(store.active_places_in_categories(&[cat]).unwrap().len(), 3);
    }
}
