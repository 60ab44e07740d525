use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub from_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from_email: "noreply@shopfast.example.com".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["FROM_EMAIL"]))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn when_env_var_set_should_override_default() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FROM_EMAIL", "orders@shopfast.test");

            let config = Config::load().unwrap();

            assert_eq!(config.from_email, "orders@shopfast.test");

            Ok(())
        });
    }

    #[test]
    fn when_env_var_missing_should_use_default() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().unwrap();

            assert_eq!(config.from_email, "noreply@shopfast.example.com");

            Ok(())
        });
    }
}
