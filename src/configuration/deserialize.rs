pub mod optional_duration {
    use crate::time::timeunit::DurationUnit;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(v) => match v.parse::<DurationUnit>() {
                Ok(value) => Ok(Some(value.into())),
                Err(err) => Err(D::Error::custom(err.to_string())),
            },
            None => Ok(None),
        }
    }
}
