use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    /// Link target of the password notification email.
    pub password_reset_url: String,
    /// Idle lifetime of a form instance before the sweeper drops it.
    pub form_ttl: Duration,
    pub sweep_interval: Duration,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("LMS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid LMS_HOST: {e}"))?;

        let port: u16 = env_or("LMS_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid LMS_PORT: {e}"))?;

        let base_url = env_or("LMS_BASE_URL", &format!("http://{host}:{port}"));
        let base_url = base_url.trim_end_matches('/').to_string();

        let password_reset_url =
            env_or("LMS_PASSWORD_RESET_URL", &format!("{base_url}/reset-password"));

        let form_ttl_secs: u64 = env_or("LMS_FORM_TTL_SECS", "3600")
            .parse()
            .map_err(|e| format!("Invalid LMS_FORM_TTL_SECS: {e}"))?;

        let sweep_interval_secs: u64 = env_or("LMS_SWEEP_INTERVAL_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid LMS_SWEEP_INTERVAL_SECS: {e}"))?;
        if sweep_interval_secs == 0 {
            return Err("LMS_SWEEP_INTERVAL_SECS must be greater than zero".to_string());
        }

        let log_level = env_or("LMS_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("LMS_SMTP_HOST").ok(),
            std::env::var("LMS_SMTP_PORT").ok(),
            std::env::var("LMS_SMTP_USER").ok(),
            std::env::var("LMS_SMTP_PASS").ok(),
            std::env::var("LMS_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid LMS_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            base_url,
            password_reset_url,
            form_ttl: Duration::from_secs(form_ttl_secs),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
            log_level,
            smtp,
        })
    }

    /// Public address of the create-user page.
    pub fn new_user_url(&self) -> String {
        format!("{}/users/new", self.base_url)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_url_joins_base_url() {
        let config = Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://lms.example".to_string(),
            password_reset_url: "https://lms.example/reset-password".to_string(),
            form_ttl: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(1),
            log_level: "info".to_string(),
            smtp: None,
        };
        assert_eq!(config.new_user_url(), "https://lms.example/users/new");
    }
}
