//! Canonical events and payloads used across pipeline tests

use serde_json::{Value, json};
use shared::{NormalizedEvent, Platform, Runner, SourceKind};

use pipeline::RawPayload;

pub struct TestFixtures;

impl TestFixtures {
    pub const CACHE_TTL_SECS: u64 = 3600;
    pub const MAX_CONCURRENT: usize = 4;

    /// a declares he/him, b declares nothing, c declares they/them
    pub fn mixed_event() -> NormalizedEvent {
        NormalizedEvent {
            source: SourceKind::Oengus,
            name: "Mixed Marathon".to_string(),
            runners: vec![
                Runner::new("a").with_pronoun("he/him"),
                Runner::new("b"),
                Runner::new("c").with_pronoun("they/them"),
            ],
            scheduled: None,
        }
    }

    pub fn with_schedule(mut event: NormalizedEvent, scheduled: &[&str]) -> NormalizedEvent {
        event.scheduled = Some(scheduled.iter().map(|s| s.to_string()).collect());
        event
    }

    pub fn undeclared_event(identifiers: &[&str]) -> NormalizedEvent {
        NormalizedEvent {
            source: SourceKind::Horaro,
            name: "Relay".to_string(),
            runners: identifiers.iter().map(|id| Runner::new(*id)).collect(),
            scheduled: None,
        }
    }

    pub fn twitch_runner(identifier: &str, twitch: &str) -> Runner {
        Runner::new(identifier).with_handle(Platform::Twitch, twitch)
    }

    pub fn oengus_payload() -> RawPayload {
        RawPayload::Oengus {
            marathon: json!({ "id": "bsgm24", "name": "Big Speedrun Marathon 2024" }),
            submissions: Self::oengus_submissions(),
            schedule: Some(json!({
                "lines": [
                    { "runners": [{ "username": "alice" }] },
                    { "runners": [{ "username": "bob" }, { "username": "zed" }] }
                ]
            })),
        }
    }

    pub fn oengus_submissions() -> Value {
        json!([
            { "user": { "username": "alice", "pronouns": "She/Her", "connections": [] } },
            {
                "user": {
                    "username": "bob",
                    "pronouns": null,
                    "connections": [{ "platform": "SPEEDRUNCOM", "username": "BobSR" }]
                }
            }
        ])
    }
}
