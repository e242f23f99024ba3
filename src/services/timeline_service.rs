use crate::models::accommodation::Accommodation;
use crate::models::tour_package::{Stop, TimelineEntry, TimelineRef};

pub struct TimelineService;

impl TimelineService {
    /// Build a stop-visit entry. An unnamed stop falls back to a positional
    /// label so the timeline never renders a blank row.
    pub fn build_stop_entry(
        start_time: &str,
        end_time: &str,
        stop: &Stop,
        position: usize,
    ) -> TimelineEntry {
        let activity_name = if stop.name.trim().is_empty() {
            format!("Stop {}", position + 1)
        } else {
            stop.name.clone()
        };

        TimelineEntry {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            activity_name,
            reference: TimelineRef::Stop { id: Some(stop.id) },
        }
    }

    pub fn build_accommodation_entry(
        start_time: &str,
        end_time: &str,
        accommodation: &Accommodation,
    ) -> TimelineEntry {
        TimelineEntry {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            activity_name: accommodation.title.clone(),
            reference: TimelineRef::Accommodation {
                id: accommodation.id,
            },
        }
    }

    /// Entries display in append order; no sorting or overlap checks.
    pub fn append(timeline: &mut Vec<TimelineEntry>, entry: TimelineEntry) {
        timeline.push(entry);
    }

    /// Thumbnail lookup for an entry. Accommodations resolve by id; stops by
    /// id when the entry carries one, otherwise by name against the stop list
    /// (legacy packages). A failed match is simply no image.
    pub fn resolve_image<'a>(
        entry: &TimelineEntry,
        stops: &'a [Stop],
        accommodations: &'a [Accommodation],
    ) -> Option<&'a str> {
        match &entry.reference {
            TimelineRef::Accommodation { id } => accommodations
                .iter()
                .find(|accommodation| accommodation.id == *id)
                .and_then(|accommodation| accommodation.thumbnail()),
            TimelineRef::Stop { id } => {
                let by_id = id.and_then(|id| stops.iter().find(|stop| stop.id == id));
                by_id
                    .or_else(|| stops.iter().find(|stop| stop.name == entry.activity_name))
                    .and_then(|stop| stop.image.as_deref())
            }
        }
    }
}
