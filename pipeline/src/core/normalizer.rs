//! Source normalization
//!
//! Turns platform-shaped documents into the canonical [`NormalizedEvent`].
//! Pure transforms only; fetching lives in the source adapters.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;

use shared::{NormalizedEvent, Platform, Runner, SourceKind};

use crate::error::{PipelineError, PipelineResult};
use crate::types::RawPayload;

/// Accepted labels for the runner-bearing Horaro column
pub const VALID_RUNNER_COLUMNS: [&str; 6] = [
    "runner",
    "runners",
    "runner(s)",
    "player",
    "players",
    "player(s)",
];

#[derive(Debug, Deserialize)]
struct OengusMarathon {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OengusSubmission {
    user: OengusUser,
}

#[derive(Debug, Deserialize)]
struct OengusUser {
    username: String,
    #[serde(default)]
    pronouns: Option<PronounField>,
    #[serde(default)]
    connections: Option<Vec<OengusConnection>>,
}

/// Oengus has served pronouns both as free text and as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PronounField {
    Text(String),
    List(Vec<String>),
}

impl PronounField {
    fn into_text(self) -> String {
        match self {
            PronounField::Text(text) => text,
            PronounField::List(parts) => parts.join("/"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OengusConnection {
    platform: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct OengusSchedule {
    #[serde(default)]
    lines: Option<Vec<OengusLine>>,
}

#[derive(Debug, Deserialize)]
struct OengusLine {
    #[serde(default)]
    runners: Vec<OengusLineRunner>,
}

#[derive(Debug, Deserialize)]
struct OengusLineRunner {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HoraroDocument {
    schedule: HoraroSchedule,
}

#[derive(Debug, Deserialize)]
struct HoraroSchedule {
    name: String,
    columns: Vec<String>,
    #[serde(default)]
    items: Vec<HoraroRow>,
}

#[derive(Debug, Deserialize)]
struct HoraroRow {
    #[serde(default)]
    data: Vec<Option<String>>,
}

/// Convert a raw payload of `source_kind` into a canonical event
pub fn normalize(payload: RawPayload, source_kind: SourceKind) -> PipelineResult<NormalizedEvent> {
    match (payload, source_kind) {
        (RawPayload::Missing, kind) => Err(PipelineError::NotFound {
            message: not_found_message(kind).to_string(),
        }),
        (
            RawPayload::Oengus {
                marathon,
                submissions,
                schedule,
            },
            SourceKind::Oengus,
        ) => normalize_oengus(marathon, submissions, schedule),
        (RawPayload::Horaro { schedule }, SourceKind::Horaro) => normalize_horaro(schedule),
        (payload, kind) => Err(PipelineError::malformed(
            kind,
            format!(
                "received a {} payload",
                payload.kind().map(|k| k.to_string()).unwrap_or_default()
            ),
        )),
    }
}

fn not_found_message(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Oengus => "No marathon with the provided slug exists.",
        SourceKind::Horaro => "No Horaro schedule exists at the provided path.",
    }
}

fn decode<T: DeserializeOwned>(kind: SourceKind, document: &str, value: Value) -> PipelineResult<T> {
    serde_json::from_value(value)
        .map_err(|e| PipelineError::malformed(kind, format!("unexpected {document} document: {e}")))
}

/// Keep the first runner for every identifier
fn dedupe_runners(runners: impl IntoIterator<Item = Runner>) -> Vec<Runner> {
    let mut seen = HashSet::new();
    runners
        .into_iter()
        .filter(|runner| seen.insert(runner.identifier.clone()))
        .collect()
}

fn platform_for(connection: &str) -> Option<Platform> {
    match connection {
        "SPEEDRUNCOM" => Some(Platform::SpeedrunCom),
        "TWITCH" => Some(Platform::Twitch),
        _ => None,
    }
}

fn normalize_oengus(
    marathon: Value,
    submissions: Value,
    schedule: Option<Value>,
) -> PipelineResult<NormalizedEvent> {
    let kind = SourceKind::Oengus;
    let marathon: OengusMarathon = decode(kind, "marathon", marathon)?;
    let submissions: Vec<OengusSubmission> = decode(kind, "submissions", submissions)?;

    let runners = submissions.into_iter().map(|submission| {
        let user = submission.user;
        let mut runner = Runner::new(user.username);
        runner.declared_pronoun = user.pronouns.map(PronounField::into_text);

        for connection in user.connections.unwrap_or_default() {
            if let Some(platform) = platform_for(&connection.platform) {
                runner.external_handles.entry(platform).or_insert(connection.username);
            }
        }
        runner
    });

    let scheduled = match schedule {
        Some(schedule) => {
            let schedule: OengusSchedule = decode(kind, "schedule", schedule)?;
            schedule.lines.map(|lines| {
                lines
                    .into_iter()
                    .flat_map(|line| line.runners)
                    .filter_map(|runner| runner.username)
                    .collect()
            })
        }
        None => None,
    };

    Ok(NormalizedEvent {
        source: kind,
        name: marathon.name,
        runners: dedupe_runners(runners),
        scheduled,
    })
}

fn normalize_horaro(document: Value) -> PipelineResult<NormalizedEvent> {
    let kind = SourceKind::Horaro;
    let document: HoraroDocument = decode(kind, "schedule", document)?;
    let schedule = document.schedule;

    let runner_column = schedule
        .columns
        .iter()
        .position(|column| VALID_RUNNER_COLUMNS.contains(&column.trim().to_lowercase().as_str()))
        .ok_or_else(|| PipelineError::malformed(kind, "runner column not found in schedule."))?;

    let runners = schedule
        .items
        .iter()
        .filter_map(|row| row.data.get(runner_column).and_then(Option::as_deref))
        .flat_map(|cell| cell.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Runner::new);

    Ok(NormalizedEvent {
        source: kind,
        name: schedule.name,
        runners: dedupe_runners(runners),
        scheduled: None,
    })
}
