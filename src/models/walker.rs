use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Three-letter weekday tokens used by the availability records and the
/// candidate query. Serialized lowercase (`mon` .. `sun`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayCode {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayCode::Mon,
            Weekday::Tue => DayCode::Tue,
            Weekday::Wed => DayCode::Wed,
            Weekday::Thu => DayCode::Thu,
            Weekday::Fri => DayCode::Fri,
            Weekday::Sat => DayCode::Sat,
            Weekday::Sun => DayCode::Sun,
        }
    }
}

/// One weekly availability entry: a day plus free-form time slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: DayCode,
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walker {
    pub id: Uuid,
    pub name: Option<String>,
    pub zones: Vec<String>,
    pub availability: Vec<AvailabilitySlot>,
    /// Hourly rate; `0.0` means the walker has not published a rate.
    pub rate_per_hour: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Walker {
    /// Exact, case-sensitive zone membership. No normalization on purpose.
    pub fn services_zone(&self, zone: &str) -> bool {
        self.zones.iter().any(|z| z == zone)
    }

    pub fn works_on(&self, day: DayCode) -> bool {
        self.availability.iter().any(|slot| slot.day == day)
    }
}
