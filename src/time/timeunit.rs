use crate::time::error::Error;
use core::str::FromStr;
use lazy_static::*;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    static ref DURATION_REGEX: Regex =
        Regex::new(r"^\s*(?P<value>\d+)\s*(?P<unit>[a-z]+)\s*$").expect("Regex compilation error");
}

#[derive(Debug, PartialEq)]
pub struct DurationUnit {
    value: u64,
    unit: TimeUnit,
}

#[derive(Debug, PartialEq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
}

impl FromStr for DurationUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DURATION_REGEX
            .captures(s)
            .ok_or_else(|| Error::Syntax(s.to_owned()))?;
        let value: u64 = caps["value"]
            .parse()
            .map_err(|_| Error::Syntax(s.to_owned()))?;
        let unit = caps["unit"].parse::<TimeUnit>()?;
        if unit == TimeUnit::Minute && value.checked_mul(60).is_none() {
            return Err(Error::Syntax(s.to_owned()));
        }
        Ok(Self { value, unit })
    }
}

impl From<DurationUnit> for Duration {
    fn from(unit: DurationUnit) -> Self {
        match unit.unit {
            TimeUnit::Millisecond => Duration::from_millis(unit.value),
            TimeUnit::Second => Duration::from_secs(unit.value),
            TimeUnit::Minute => Duration::from_secs(unit.value.saturating_mul(60)),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms" | "millisecond" | "millis" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "second" | "secs" | "seconds" => Ok(TimeUnit::Second),
            "m" | "minute" | "mins" | "minutes" => Ok(TimeUnit::Minute),
            _ => Err(Error::UnitNotSupported(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::time::error::Error;
    use crate::time::timeunit::DurationUnit;
    use crate::time::timeunit::TimeUnit;
    use std::time::Duration;

    #[test]
    fn test_building_time_unit_from_string() {
        assert_eq!("ms".parse::<TimeUnit>(), Ok(TimeUnit::Millisecond));
        assert_eq!("secs".parse::<TimeUnit>(), Ok(TimeUnit::Second));
        assert_eq!("m".parse::<TimeUnit>(), Ok(TimeUnit::Minute));
        assert_eq!(
            "h".parse::<TimeUnit>(),
            Err(Error::UnitNotSupported("h".to_owned()))
        );
    }

    #[test]
    fn test_conversion_duration_unit_to_duration() {
        let unit = "200ms".parse::<DurationUnit>().unwrap();
        let result: Duration = unit.into();
        assert_eq!(result, Duration::from_millis(200));

        let unit = " 30 s ".parse::<DurationUnit>().unwrap();
        assert_eq!(Duration::from(unit), Duration::from_secs(30));
    }

    #[test]
    fn test_rejecting_malformed_duration() {
        assert_eq!(
            "ten seconds".parse::<DurationUnit>(),
            Err(Error::Syntax("ten seconds".to_owned()))
        );
    }

    #[test]
    fn test_rejecting_minutes_past_duration_range() {
        assert_eq!(
            "400000000000000000m".parse::<DurationUnit>(),
            Err(Error::Syntax("400000000000000000m".to_owned()))
        );
        let unit = "5m".parse::<DurationUnit>().unwrap();
        assert_eq!(Duration::from(unit), Duration::from_secs(300));
    }
}
