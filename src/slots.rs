// The daily booking grid: lunch and dinner service in half-hour steps.
// Changing the grid is a data migration shared with the schema CHECKs,
// not a logic change.
pub const TIME_SLOTS: [&str; 13] = [
    "12:00",
    "12:30",
    "13:00",
    "13:30",
    "14:00",
    "14:30",
    "19:00",
    "19:30",
    "20:00",
    "20:30",
    "21:00",
    "21:30",
    "22:00",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot(String);

impl TimeSlot{
    pub fn parse(value: &str) -> Result<TimeSlot, String>{
        if TIME_SLOTS.contains(&value){
            Ok(TimeSlot(value.to_string()))
        } else {
            Err(format!("{} is not a bookable time slot", value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    // Every slot of the grid, in service order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        TIME_SLOTS.iter().map(|slot| TimeSlot(slot.to_string()))
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
