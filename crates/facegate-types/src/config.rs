use chrono::NaiveTime;
use secrecy::SecretString;
use serde::Deserialize;

/// Service configuration, loaded from `{data_dir}/config.toml` with env
/// fallbacks for deployment-critical values. Every section has defaults so
/// a missing or partial file still yields a runnable service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub matching: MatchingConfig,
    pub encoder: EncoderConfig,
    pub schedule: ScheduleConfig,
    pub admin: AdminConfig,
}

/// Which score function the match policy uses, and where it cuts off.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub metric: MetricKind,
    /// Similarity threshold or distance tolerance, depending on `metric`.
    pub threshold: f32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        // 0.5 is the balanced cosine cutoff for the default 512-dim
        // encoder: below ~0.4 enrollment photos stop matching their own
        // owner, above ~0.6 lookalikes start passing.
        Self {
            metric: MetricKind::Cosine,
            threshold: 0.5,
        }
    }
}

/// Score function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Cosine similarity, range [-1, 1], higher is better.
    Cosine,
    /// Euclidean distance, lower is better.
    Distance,
}

/// Face-encoder sidecar connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Expected embedding dimension; responses with another dimension are
    /// rejected (mixing providers is undefined behavior).
    pub dimension: usize,
    /// Model label reported by the sidecar, for logs and responses.
    pub model: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5100".to_string(),
            timeout_secs: 10,
            dimension: 512,
            model: "buffalo_s".to_string(),
        }
    }
}

/// Work schedule used to classify attendance events and build the recap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Lowercase English weekday names.
    pub workdays: Vec<String>,
    /// Local wall-clock "HH:MM"; clock-ins after this are late.
    pub clock_in_deadline: String,
    /// Local wall-clock "HH:MM"; events after this count as clock-out.
    pub clock_out_after: String,
    /// Offset applied to UTC timestamps for schedule decisions and recap
    /// display. Default +7 (Asia/Jakarta).
    pub utc_offset_hours: i8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            workdays: ["monday", "tuesday", "wednesday", "thursday", "friday"]
                .map(String::from)
                .to_vec(),
            clock_in_deadline: "08:00".to_string(),
            clock_out_after: "16:00".to_string(),
            utc_offset_hours: 7,
        }
    }
}

impl ScheduleConfig {
    /// Parse `clock_in_deadline`, falling back to the default on malformed input.
    pub fn clock_in_deadline_time(&self) -> NaiveTime {
        parse_hhmm(&self.clock_in_deadline)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(8, 0, 0).unwrap())
    }

    /// Parse `clock_out_after`, falling back to the default on malformed input.
    pub fn clock_out_after_time(&self) -> NaiveTime {
        parse_hhmm(&self.clock_out_after)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(16, 0, 0).unwrap())
    }

    pub fn is_workday(&self, weekday: chrono::Weekday) -> bool {
        let name = weekday_name(weekday);
        self.workdays.iter().any(|d| d == name)
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "monday",
        chrono::Weekday::Tue => "tuesday",
        chrono::Weekday::Wed => "wednesday",
        chrono::Weekday::Thu => "thursday",
        chrono::Weekday::Fri => "friday",
        chrono::Weekday::Sat => "saturday",
        chrono::Weekday::Sun => "sunday",
    }
}

/// Admin credential for the login endpoint. When unset, only employee
/// logins succeed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.matching.threshold, 0.5);
        assert_eq!(config.matching.metric, MetricKind::Cosine);
        assert_eq!(config.encoder.dimension, 512);
        assert_eq!(config.schedule.utc_offset_hours, 7);
        assert!(config.admin.email.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
[matching]
metric = "distance"
threshold = 0.6
"#,
        )
        .unwrap();
        assert_eq!(config.matching.metric, MetricKind::Distance);
        assert_eq!(config.matching.threshold, 0.6);
        assert_eq!(config.encoder.model, "buffalo_s");
    }

    #[test]
    fn test_schedule_time_parsing() {
        let schedule = ScheduleConfig {
            clock_in_deadline: "09:30".to_string(),
            ..ScheduleConfig::default()
        };
        assert_eq!(
            schedule.clock_in_deadline_time(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_schedule_malformed_time_falls_back() {
        let schedule = ScheduleConfig {
            clock_out_after: "not a time".to_string(),
            ..ScheduleConfig::default()
        };
        assert_eq!(
            schedule.clock_out_after_time(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_workday_check() {
        let schedule = ScheduleConfig::default();
        assert!(schedule.is_workday(chrono::Weekday::Mon));
        assert!(!schedule.is_workday(chrono::Weekday::Sun));
    }
}
