//! CLI argument parsing for egyroute

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chrono::NaiveDate;
use placestore::{Language, SortKey};

#[derive(Parser, Debug)]
#[command(name = "er")]
#[command(author, version, about = "Bilingual Egypt tourism catalog and trip planner", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the catalog database (overrides config)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Display language: ar or en (overrides config)
    #[arg(short, long)]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty catalog database
    Init,

    /// Load the sample catalog content
    Seed,

    /// List categories with their place counts
    Categories,

    /// List governorates that have active places
    Governorates,

    /// List the featured places highlighted on the home view
    Featured {
        /// Maximum places to list (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List places, with optional filters
    Places {
        /// Filter by category slug
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Filter by governorate slug
        #[arg(short = 'g', long)]
        governorate: Option<String>,

        /// Substring search over names, descriptions and cities
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: priority, name, governorate, popular
        #[arg(long, default_value = "priority")]
        sort: SortKey,

        /// Maximum places to list
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one place in full
    Show {
        /// Place slug
        #[arg(required = true)]
        slug: String,
    },

    /// Generate a day-by-day tour program
    Plan {
        /// Trip length in days (1-14)
        #[arg(short, long, required = true)]
        days: u32,

        /// Category slugs to draw places from
        #[arg(required = true, value_delimiter = ',')]
        categories: Vec<String>,
    },

    /// Submit a contact message
    Contact {
        #[arg(long, required = true)]
        name: String,

        #[arg(long, required = true)]
        email: String,

        #[arg(long, required = true)]
        subject: String,

        #[arg(long, required = true)]
        message: String,

        #[arg(long)]
        phone: Option<String>,

        /// Slug of the place the message is about
        #[arg(long)]
        place: Option<String>,
    },

    /// List contact messages
    ContactList {
        /// Only messages not yet read
        #[arg(short, long)]
        unread: bool,
    },

    /// Mark a contact message as read
    ContactRead {
        /// Message id
        #[arg(required = true)]
        id: i64,
    },

    /// Save a place for a user, or remove it if already saved
    Save {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Place slug
        #[arg(required = true)]
        place: String,
    },

    /// List a user's saved places
    Saved {
        /// User name
        #[arg(required = true)]
        user: String,
    },

    /// Create a trip plan
    TripCreate {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Plan title
        #[arg(required = true)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// Budget in EGP
        #[arg(long)]
        budget: Option<f64>,
    },

    /// List a user's trip plans
    TripList {
        /// User name
        #[arg(required = true)]
        user: String,
    },

    /// Show a trip plan with its scheduled places
    TripShow {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Plan id
        #[arg(required = true)]
        id: i64,
    },

    /// Add a place to a trip plan day
    TripAdd {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Plan id
        #[arg(required = true)]
        id: i64,

        /// Place slug
        #[arg(required = true)]
        place: String,

        /// Day number within the plan
        #[arg(short, long, required = true)]
        day: u32,
    },

    /// Remove an entry from a trip plan
    TripRemove {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Plan id
        #[arg(required = true)]
        id: i64,

        /// Entry id
        #[arg(required = true)]
        entry: i64,
    },

    /// Delete a trip plan
    TripDelete {
        /// User name
        #[arg(required = true)]
        user: String,

        /// Plan id
        #[arg(required = true)]
        id: i64,
    },

    /// Show catalog statistics
    Stats,
}
