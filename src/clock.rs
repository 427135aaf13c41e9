use std::fmt;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use time_tz::{timezones, ToTimezone, Tz};

pub(crate) const DEFAULT_ZONE: &str = "Asia/Taipei";

/// An IANA timezone in which "today" is determined
#[derive(Clone)]
pub(crate) struct Zone {
    name: String,
    tz: &'static Tz,
}

impl Zone {
    pub(crate) fn from_name(name: &str) -> Result<Zone, UnknownZoneError> {
        match timezones::get_by_name(name) {
            Some(tz) => Ok(Zone {
                name: name.to_owned(),
                tz,
            }),
            None => Err(UnknownZoneError(name.to_owned())),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Zone").field(&self.name).finish()
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Zone) -> bool {
        self.name == other.name
    }
}

impl Eq for Zone {}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown timezone {0:?}")]
pub(crate) struct UnknownZoneError(String);

/// A fixed instant paired with the zone used to interpret it.  Nothing below
/// `main` reads the wall clock; everything else is handed a `Clock` or the
/// `Date` it yields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Clock {
    now: OffsetDateTime,
    zone: Zone,
}

impl Clock {
    pub(crate) fn new(now: OffsetDateTime, zone: Zone) -> Clock {
        Clock { now, zone }
    }

    pub(crate) fn system(zone: Zone) -> Clock {
        Clock::new(OffsetDateTime::now_utc(), zone)
    }

    pub(crate) fn zone(&self) -> &Zone {
        &self.zone
    }

    pub(crate) fn today(&self) -> Date {
        self.now.to_timezone(self.zone.tz).date()
    }
}
