#[derive(clap::Parser, Clone, Debug)]
pub struct Config {
    #[clap(long, env, default_value = "api")]
    pub app_component: String,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub api_host: String,

    #[clap(long, env = "PORT", default_value_t = 5000)]
    pub api_port: u16,

    #[clap(long, env = "MONGO_URI")]
    pub database_url: String,

    #[clap(long, env, default_value = "gcg")]
    pub database_name: String,

    #[clap(long, env, default_value = "https://alfa-leetcode-api.onrender.com")]
    pub leetcode_api_base_url: String,

    #[clap(long, env, default_value = "https://codeforces.com/api")]
    pub codeforces_api_base_url: String,

    #[clap(long, env, default_value_t = 15)]
    pub provider_timeout_secs: u64,

    #[clap(long, env, default_value = "GCG-Leaderboard/1.0")]
    pub provider_user_agent: String,

    #[clap(long, env)]
    pub gemini_api_key: Option<String>,

    #[clap(long, env, default_value = "gemini-flash-latest")]
    pub gemini_model: String,

    #[clap(long, env, default_value = "https://generativelanguage.googleapis.com")]
    pub gemini_api_base_url: String,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,
}
