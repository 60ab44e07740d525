use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub products_table: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            products_table: "shopfast-products".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["PRODUCTS_TABLE"]))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn when_env_var_set_should_override_default() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PRODUCTS_TABLE", "catalog-test-table");

            let config = Config::load().unwrap();

            assert_eq!(config.products_table, "catalog-test-table");

            Ok(())
        });
    }

    #[test]
    fn when_env_var_missing_should_use_default() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().unwrap();

            assert_eq!(config.products_table, "shopfast-products");

            Ok(())
        });
    }
}
