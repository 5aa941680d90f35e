use crate::MoodlogError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: SecretString,
    pub base_url: String,
    pub music_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, MoodlogError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, MoodlogError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("MOODLOG_ACCESS_TOKEN")
            .ok_or_else(|| MoodlogError::Config("MOODLOG_ACCESS_TOKEN missing".into()))?;
        let base_url = get("MOODLOG_BASE_URL").unwrap_or_else(|| "http://localhost:8080".into());
        let music_base_url =
            get("MOODLOG_MUSIC_BASE_URL").unwrap_or_else(|| "http://localhost:8000".into());
        Ok(Self {
            access_token: SecretString::new(token.into()),
            base_url,
            music_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_missing_token() {
        let get = |k: &str| match k {
            "MOODLOG_BASE_URL" => Some("http://localhost".into()),
            _ => None,
        };
        let res = Config::from_env_with(get);
        assert!(res.is_err());
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "MOODLOG_ACCESS_TOKEN" => Some("sekrit".into()),
            "MOODLOG_BASE_URL" => Some("http://api.local".into()),
            "MOODLOG_MUSIC_BASE_URL" => Some("http://music.local".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://api.local");
        assert_eq!(cfg.music_base_url, "http://music.local");
    }

    #[test]
    fn from_env_applies_default_base_urls() {
        let get = |k: &str| match k {
            "MOODLOG_ACCESS_TOKEN" => Some("sekrit".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.music_base_url, "http://localhost:8000");
    }
}
