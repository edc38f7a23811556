use std::collections::HashMap;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use placestore::{
    CategoryField, GovernorateField, Language, Localized, PlaceField, PlaceQuery, PlaceStore,
    SaveOutcome, TripPlan,
};

use egyroute::cli::{Cli, Command};
use egyroute::config::Config;
use egyroute::forms::{ContactForm, PlannerForm};
use egyroute::render::{self, Renderer};
use egyroute::{planner, seed};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn open_store(config: &Config) -> Result<PlaceStore> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(PlaceStore::open(&config.db_path)?)
}

fn governorate_names(store: &PlaceStore, lang: Language) -> Result<HashMap<i64, String>> {
    Ok(store
        .governorates()?
        .into_iter()
        .map(|g| (g.id, g.localized(GovernorateField::Name, lang).to_string()))
        .collect())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    let lang = config.language;

    info!("egyroute starting");

    match cli.command {
        Command::Init => {
            let _ = open_store(&config)?;
            println!(
                "{} Catalog ready at {}",
                "✓".green(),
                config.db_path.display().to_string().cyan()
            );
        }
        Command::Seed => {
            let store = open_store(&config)?;
            let report = seed::load(&store)?;
            println!(
                "{} Loaded {} categories, {} governorates, {} places",
                "✓".green(),
                report.categories,
                report.governorates,
                report.places
            );
        }
        Command::Categories => {
            let store = open_store(&config)?;
            let categories = store.categories()?;
            if categories.is_empty() {
                println!("No categories found");
            } else {
                for category in categories {
                    let count = store.category_place_count(category.id)?;
                    println!(
                        "{} ({}) {}",
                        category.localized(CategoryField::Name, lang).bold(),
                        category.slug.cyan(),
                        format!("[{}]", count).dimmed()
                    );
                }
            }
        }
        Command::Governorates => {
            let store = open_store(&config)?;
            let summaries = store.governorates_with_places()?;
            if summaries.is_empty() {
                println!("No governorates with places yet");
            } else {
                for summary in summaries {
                    println!(
                        "{} ({}) {}",
                        summary
                            .governorate
                            .localized(GovernorateField::Name, lang)
                            .bold(),
                        summary.governorate.slug.cyan(),
                        format!("[{}]", summary.place_count).dimmed()
                    );
                }
            }
        }
        Command::Featured { limit } => {
            let store = open_store(&config)?;
            let names = governorate_names(&store, lang)?;
            let rows: Vec<_> = store
                .featured_places(limit.unwrap_or(config.featured_limit as u32))?
                .into_iter()
                .map(|place| {
                    let governorate = names.get(&place.governorate_id).cloned().unwrap_or_default();
                    (place, governorate)
                })
                .collect();

            let title = match lang {
                Language::Ar => "أماكن مميزة",
                Language::En => "Featured places",
            };
            let data = render::place_list_data(title, &rows, lang);
            print!("{}", Renderer::new().render("places", &data)?);
        }
        Command::Places {
            category,
            governorate,
            search,
            sort,
            limit,
        } => {
            let store = open_store(&config)?;
            let mut query = PlaceQuery::default().sort(sort);
            if let Some(slug) = category {
                query = query.category(slug);
            }
            if let Some(slug) = governorate {
                query = query.governorate(slug);
            }
            if let Some(text) = search {
                query = query.search(text);
            }
            query = query.limit(limit.unwrap_or(config.page_size as u32));

            let names = governorate_names(&store, lang)?;
            let rows: Vec<_> = store
                .places(&query)?
                .into_iter()
                .map(|place| {
                    let governorate = names.get(&place.governorate_id).cloned().unwrap_or_default();
                    (place, governorate)
                })
                .collect();

            let title = match lang {
                Language::Ar => "الأماكن السياحية",
                Language::En => "Tourist places",
            };
            let data = render::place_list_data(title, &rows, lang);
            print!("{}", Renderer::new().render("places", &data)?);
        }
        Command::Show { slug } => {
            let store = open_store(&config)?;
            let place = store.place_by_slug(&slug)?;
            store.increment_views(place.id)?;

            let categories = store.categories()?;
            let category = categories
                .iter()
                .find(|c| c.id == place.category_id)
                .ok_or_else(|| eyre::eyre!("Category missing for place: {}", slug))?;
            let governorate = store
                .governorates()?
                .into_iter()
                .find(|g| g.id == place.governorate_id)
                .ok_or_else(|| eyre::eyre!("Governorate missing for place: {}", slug))?;
            let related = store.related_places(&place, config.related_limit as u32)?;

            let data = render::place_data(&place, category, &governorate, &related, lang);
            print!("{}", Renderer::new().render("place", &data)?);
        }
        Command::Plan { days, categories } => {
            let store = open_store(&config)?;
            let mut ids = Vec::new();
            for slug in &categories {
                ids.push(store.category_by_slug(slug)?.id);
            }

            let request = PlannerForm::new(days, ids).validate()?;
            let itinerary = planner::generate(&store, &request)?;

            let data = render::itinerary_data(&itinerary, lang);
            print!("{}", Renderer::new().render("itinerary", &data)?);
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
            phone,
            place,
        } => {
            let store = open_store(&config)?;
            let place_id = match place {
                Some(slug) => Some(store.place_by_slug(&slug)?.id),
                None => None,
            };
            let form = ContactForm {
                name,
                email,
                phone,
                subject,
                message,
                place_id,
            };
            let record = form.validate()?;
            let id = store.insert_contact(&record)?;
            println!("{} Message received (id {})", "✓".green(), id);
        }
        Command::ContactList { unread } => {
            let store = open_store(&config)?;
            let messages = store.contact_messages(unread)?;
            if messages.is_empty() {
                println!("No messages");
            } else {
                for m in messages {
                    let marker = if m.is_read { " " } else { "*" };
                    println!(
                        "{} {} {} <{}> {}",
                        marker.yellow(),
                        m.id.to_string().cyan(),
                        m.name.bold(),
                        m.email,
                        m.subject
                    );
                }
            }
        }
        Command::ContactRead { id } => {
            let store = open_store(&config)?;
            store.mark_contact_read(id)?;
            println!("{} Marked message {} as read", "✓".green(), id);
        }
        Command::Save { user, place } => {
            let store = open_store(&config)?;
            let record = store.place_by_slug(&place)?;
            match store.toggle_saved(&user, record.id)? {
                SaveOutcome::Saved => println!("{} Saved {}", "✓".green(), place.cyan()),
                SaveOutcome::Removed => println!("{} Removed {}", "✓".green(), place.cyan()),
            }
        }
        Command::Saved { user } => {
            let store = open_store(&config)?;
            let saved = store.saved_places(&user)?;
            if saved.is_empty() {
                println!("No saved places for {}", user);
            } else {
                for (_, place) in saved {
                    println!(
                        "{} ({})",
                        place.localized(PlaceField::Name, lang).bold(),
                        place.slug.cyan()
                    );
                }
            }
        }
        Command::TripCreate {
            user,
            title,
            description,
            start,
            end,
            budget,
        } => {
            let store = open_store(&config)?;
            let mut plan = TripPlan::new(user, title);
            if let Some(description) = description {
                plan = plan.with_description(description);
            }
            if let (Some(start), Some(end)) = (start, end) {
                plan = plan.with_dates(start, end);
            }
            if let Some(budget) = budget {
                plan = plan.with_budget(budget);
            }
            let id = store.create_trip_plan(&plan)?;
            println!("{} Created trip plan {}", "✓".green(), id);
        }
        Command::TripList { user } => {
            let store = open_store(&config)?;
            let plans = store.trip_plans(&user)?;
            if plans.is_empty() {
                println!("No trip plans for {}", user);
            } else {
                for plan in plans {
                    let days = plan.duration_days();
                    let span = if days > 0 {
                        format!("{} days", days)
                    } else {
                        "undated".to_string()
                    };
                    println!(
                        "{} {} [{}] {}",
                        plan.id.to_string().cyan(),
                        plan.title.bold(),
                        plan.status,
                        span.dimmed()
                    );
                }
            }
        }
        Command::TripShow { user, id } => {
            let store = open_store(&config)?;
            let plan = store.trip_plan(&user, id)?;
            println!("{} [{}]", plan.title.bold(), plan.status);
            if !plan.description.is_empty() {
                println!("{}", plan.description);
            }
            if let (Some(start), Some(end)) = (plan.start_date, plan.end_date) {
                println!("{} - {}", start, end);
            }
            if let Some(budget) = plan.budget {
                println!("Budget: EGP {:.2}", budget);
            }

            let entries = store.trip_plan_entries(id)?;
            if entries.is_empty() {
                println!("No places scheduled yet");
            } else {
                let mut current_day = 0;
                for entry in entries {
                    if entry.day_number != current_day {
                        current_day = entry.day_number;
                        println!("{}", format!("Day {}", current_day).bold());
                    }
                    let place = store.place_by_id(entry.place_id)?;
                    let done = if entry.is_completed { "✓" } else { " " };
                    println!(
                        "  {} {} {} ({})",
                        done.green(),
                        entry.id.to_string().dimmed(),
                        place.localized(PlaceField::Name, lang),
                        place.slug.cyan()
                    );
                }
            }
        }
        Command::TripAdd {
            user,
            id,
            place,
            day,
        } => {
            let store = open_store(&config)?;
            let plan = store.trip_plan(&user, id)?;
            let record = store.place_by_slug(&place)?;
            if store.add_place_to_plan(plan.id, record.id, day)? {
                println!("{} Added {} to day {}", "✓".green(), place.cyan(), day);
            } else {
                println!("{} already on day {}", place.cyan(), day);
            }
        }
        Command::TripRemove { user, id, entry } => {
            let store = open_store(&config)?;
            let plan = store.trip_plan(&user, id)?;
            store.remove_plan_entry(plan.id, entry)?;
            println!("{} Removed entry {}", "✓".green(), entry);
        }
        Command::TripDelete { user, id } => {
            let store = open_store(&config)?;
            store.delete_trip_plan(&user, id)?;
            println!("{} Deleted trip plan {}", "✓".green(), id);
        }
        Command::Stats => {
            let store = open_store(&config)?;
            let stats = store.stats()?;
            println!("Places: {}", stats.total_places);
            println!("Governorates: {}", stats.total_governorates);
            println!("Categories: {}", stats.total_categories);
        }
    }

    Ok(())
}
