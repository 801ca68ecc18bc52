use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Source of "now" for everything that stamps or evaluates revisions
/// This allows for flexible date handling (system time, overrides, fixed instants in tests)
pub trait DateProvider: Send + Sync {
    /// Get the current date/time
    fn get_current_time(&self) -> DateTime<Utc>;
}

/// Closures returning a fixed or computed instant act as providers
impl<F> DateProvider for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn get_current_time(&self) -> DateTime<Utc> {
        self()
    }
}

/// Default date provider that uses the system's current date/time
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Date provider that pins the calendar day to an override date
/// Preserves the current hours/minutes/seconds from system time
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    /// Create a new override date provider with a specific date
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.override_date
            .and_hms_opt(now.hour(), now.minute(), now.second())
            .or_else(|| self.override_date.and_hms_opt(0, 0, 0))
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
            .unwrap_or(now)
    }
}
