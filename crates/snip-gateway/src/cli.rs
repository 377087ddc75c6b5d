use clap::{Parser, ValueEnum};
use snip_core::settings::{
    DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH, DEFAULT_MAX_GENERATION_RETRIES,
    DEFAULT_REAP_INTERVAL_SECS, DEFAULT_VALIDITY_MINUTES,
};
use snip_core::Settings;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIP_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SNIP_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";
pub const CODE_LENGTH_ENV: &str = "SNIP_CODE_LENGTH";
pub const CODE_ALPHABET_ENV: &str = "SNIP_CODE_ALPHABET";
pub const VALIDITY_MINUTES_ENV: &str = "SNIP_DEFAULT_VALIDITY_MINUTES";
pub const REAP_INTERVAL_ENV: &str = "SNIP_REAP_INTERVAL_SECS";
pub const MAX_RETRIES_ENV: &str = "SNIP_MAX_GENERATION_RETRIES";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snip")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public origin prepended to short codes in responses.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = CODE_ALPHABET_ENV, default_value = DEFAULT_ALPHABET)]
    pub code_alphabet: String,

    #[arg(long, env = VALIDITY_MINUTES_ENV, default_value_t = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: i64,

    #[arg(long, env = REAP_INTERVAL_ENV, default_value_t = DEFAULT_REAP_INTERVAL_SECS)]
    pub reap_interval_secs: u64,

    #[arg(long, env = MAX_RETRIES_ENV, default_value_t = DEFAULT_MAX_GENERATION_RETRIES)]
    pub max_generation_retries: u32,
}

impl CLI {
    pub fn settings(&self) -> Settings {
        Settings::builder()
            .code_length(self.code_length)
            .code_alphabet(self.code_alphabet.clone())
            .default_validity_minutes(self.default_validity_minutes)
            .reap_interval_secs(self.reap_interval_secs)
            .max_generation_retries(self.max_generation_retries)
            .build()
    }
}
