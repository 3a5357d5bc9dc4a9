use clap::Parser;

use crate::config::Overrides;

/// Open a saved class schedule as a weekly timetable
#[derive(Debug, Parser)]
#[command(name = "jadwal", version = env!("CARGO_PKG_VERSION"), long_about = None)]
pub struct Cli {
    /// Id of the saved schedule to show
    pub schedule_id: String,

    /// Use the compact layout (room under the course name, no time header)
    #[arg(long)]
    pub mobile: bool,

    /// Override the API base URL from the config file
    #[arg(long = "api-url")]
    pub api_url: Option<String>,
}

impl Cli {
    /// Overrides for this run; none of them are saved
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_base_url: self.api_url.clone(),
            mobile: self.mobile.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Settings};

    #[test]
    fn test_parse_schedule_id_and_flags() {
        let cli = Cli::try_parse_from(["jadwal", "5d5a", "--mobile", "--api-url", "http://x/api"]).unwrap();
        assert_eq!(cli.schedule_id, "5d5a");
        assert_eq!(
            cli.overrides(),
            Overrides {
                api_base_url: Some("http://x/api".to_string()),
                mobile: Some(true),
            }
        );
    }

    #[test]
    fn test_schedule_id_is_required() {
        assert!(Cli::try_parse_from(["jadwal"]).is_err());
    }

    #[test]
    fn test_no_flags_keep_stored_config() {
        let cli = Cli::try_parse_from(["jadwal", "5d5a"]).unwrap();
        let stored = Config {
            mobile: true,
            ..Config::default()
        };
        let settings = Settings::new(stored, cli.overrides(), None);
        assert!(settings.config().mobile);
        assert_eq!(settings.config().api_base_url, Config::default().api_base_url);
    }
}
