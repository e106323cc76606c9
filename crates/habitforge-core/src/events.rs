use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every state change in the tracker produces an Event.
/// Renderers and effect layers (toasts, celebrations) subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    HabitCreated {
        habit_id: String,
        name: String,
    },
    HabitDeleted {
        habit_id: String,
    },
    HabitToggled {
        habit_id: String,
        date: NaiveDate,
        completed: bool,
    },
    LevelUp {
        new_level: u32,
    },
}

/// Receiver for tracker events.
///
/// Sinks are called synchronously, after the change has been persisted.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

impl<F> EventSink for F
where
    F: FnMut(&Event),
{
    fn emit(&mut self, event: &Event) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let ev = Event::HabitToggled {
            habit_id: "a".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            completed: true,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "HabitToggled");
        assert_eq!(json["habitId"], "a");
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn level_up_round_trips_with_camel_case_field() {
        let json = r#"{"type":"LevelUp","newLevel":4}"#;
        let ev: Event = serde_json::from_str(json).unwrap();
        assert_eq!(ev, Event::LevelUp { new_level: 4 });
        assert_eq!(serde_json::to_string(&ev).unwrap(), json);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: &Event| seen.push(e.clone());
            sink.emit(&Event::LevelUp { new_level: 3 });
        }
        assert_eq!(seen, vec![Event::LevelUp { new_level: 3 }]);
    }
}
