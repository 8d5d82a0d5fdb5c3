use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub scoring_base_url: String,
    pub scoring_timeout_secs: u64,
    pub score_seed: Option<u64>, // Reproducible scores for demos
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            scoring_base_url: std::env::var("SCORING_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
                .trim()
                .trim_end_matches('/')
                .to_string(),
            scoring_timeout_secs: std::env::var("SCORING_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SCORING_TIMEOUT_SECS must be a whole number"))
                .and_then(|secs: u64| {
                    if secs == 0 {
                        anyhow::bail!("SCORING_TIMEOUT_SECS must be greater than 0");
                    }
                    Ok(secs)
                })?,
            score_seed: std::env::var("SCORE_SEED")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.trim()
                        .parse::<u64>()
                        .map_err(|_| anyhow::anyhow!("SCORE_SEED must be an unsigned integer"))
                })
                .transpose()?,
        };

        config.validate()?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Scoring Base URL: {}", config.scoring_base_url);
        tracing::debug!("Scoring timeout: {}s", config.scoring_timeout_secs);
        if let Some(seed) = config.score_seed {
            tracing::info!("Score synthesis seeded with {}", seed);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.scoring_base_url.is_empty() {
            anyhow::bail!("SCORING_BASE_URL cannot be empty");
        }
        if !self.scoring_base_url.starts_with("http://")
            && !self.scoring_base_url.starts_with("https://")
        {
            anyhow::bail!("SCORING_BASE_URL must start with http:// or https://");
        }
        Ok(())
    }
}
