//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Local date stamps on history records
//! - Storage (LocalStorage on web, CSV files on native), see `persistence`

/// Source of the date written into history records
pub trait Clock {
    /// Today's local date as `MMDDYY`
    fn today(&self) -> String;
}

/// Local wall clock of the running platform
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn today(&self) -> String {
        chrono::Local::now().format("%m%d%y").to_string()
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn today(&self) -> String {
        let date = js_sys::Date::new_0();
        date_stamp(
            date.get_month() + 1,
            date.get_date(),
            date.get_full_year() % 100,
        )
    }
}

/// Always reports the same date
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.0.clone()
    }
}

/// `MMDDYY`, zero padded, no separators
pub fn date_stamp(month: u32, day: u32, year: u32) -> String {
    format!("{:02}{:02}{:02}", month, day, year % 100)
}
