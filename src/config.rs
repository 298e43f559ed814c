use std::{
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL_ID: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model_id: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("SERVER_ADDR")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT));

        let api_key = lookup("GROQ_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_base_url = lookup("GROQ_API_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            anyhow::bail!("GROQ_API_URL must not be empty");
        }

        let model_id = lookup("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        Ok(Self {
            listen_addr,
            api_key,
            api_base_url,
            model_id,
        })
    }

    /// Startup notice for a missing provider key. The service still starts;
    /// predictions then carry the provider's authentication error.
    pub fn missing_api_key_warning(&self) -> Option<&'static str> {
        self.api_key
            .is_none()
            .then_some("GROQ_API_KEY is not set; predictions will fail until it is provided")
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model_id", &self.model_id)
            .finish()
    }
}
