//! Event commands

use alumni_client::api::events::{self, EventUpdate, NewEvent};
use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::Subcommand;

use crate::context::AppContext;

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Subcommand)]
pub enum EventsCommand {
    /// Create an event
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        location: String,

        /// RFC 3339, or local time as "YYYY-MM-DD HH:MM"
        #[arg(long, value_parser = parse_datetime)]
        datetime: DateTime<Utc>,

        #[arg(long, default_value_t = 0.0)]
        cost: f64,

        #[arg(long)]
        online: bool,

        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,
    },

    /// List approved events
    List,

    /// Show one event
    Get { event_id: String },

    /// List events created by the signed-in user
    Owned,

    /// List the signed-in user's events awaiting approval
    OwnedPending,

    /// List events the signed-in user has joined
    Joined,

    /// Update fields of an event
    Update {
        event_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, value_parser = parse_datetime)]
        datetime: Option<DateTime<Utc>>,

        #[arg(long)]
        cost: Option<f64>,

        #[arg(long)]
        online: Option<bool>,

        #[arg(long)]
        cover: Option<String>,
    },

    /// Delete an event
    Delete { event_id: String },

    /// Join an event
    Join { event_id: String },

    /// Leave an event
    Leave { event_id: String },

    /// List the participants of an event
    Participants { event_id: String },
}

pub async fn run(ctx: &AppContext, cmd: EventsCommand) -> Result<bool> {
    match cmd {
        EventsCommand::Create {
            title,
            description,
            location,
            datetime,
            cost,
            online,
            cover,
        } => {
            let event = NewEvent {
                title,
                description,
                location,
                datetime,
                cost,
                is_online: online,
                cover,
            };
            ctx.execute(&events::CREATE, events::create(&event)).await
        }
        EventsCommand::List => ctx.execute(&events::LIST, events::list()).await,
        EventsCommand::Get { event_id } => ctx.execute(&events::GET, events::get(&event_id)).await,
        EventsCommand::Owned => ctx.execute(&events::LIST_OWNED, events::list_owned()).await,
        EventsCommand::OwnedPending => {
            ctx.execute(&events::LIST_OWNED_PENDING, events::list_owned_pending())
                .await
        }
        EventsCommand::Joined => {
            ctx.execute(&events::LIST_JOINED, events::list_joined())
                .await
        }
        EventsCommand::Update {
            event_id,
            title,
            description,
            location,
            datetime,
            cost,
            online,
            cover,
        } => {
            let update = EventUpdate {
                title,
                description,
                location,
                datetime,
                cost,
                is_online: online,
                cover,
            };
            if update == EventUpdate::default() {
                bail!("nothing to update; pass at least one field");
            }
            ctx.execute(&events::UPDATE, events::update(&event_id, &update))
                .await
        }
        EventsCommand::Delete { event_id } => {
            ctx.execute(&events::DELETE, events::delete(&event_id))
                .await
        }
        EventsCommand::Join { event_id } => {
            ctx.execute(&events::JOIN, events::join(&event_id)).await
        }
        EventsCommand::Leave { event_id } => {
            ctx.execute(&events::LEAVE, events::leave(&event_id)).await
        }
        EventsCommand::Participants { event_id } => {
            ctx.execute(
                &events::LIST_PARTICIPANTS,
                events::list_participants(&event_id),
            )
            .await
        }
    }
}

/// Accept RFC 3339, or a naive local timestamp converted to UTC.
pub fn parse_datetime(input: &str) -> std::result::Result<DateTime<Utc>, String> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| format!("{input} does not exist in the local time zone"));
        }
    }

    Err(format!(
        "invalid datetime {input:?}; expected RFC 3339 or YYYY-MM-DD HH:MM"
    ))
}
