use config::{Config, ConfigError, Environment};
use dotenv::dotenv;
use toy_ecc::{CurveError, CurveParameters};

/// Curve coefficients read from `CURVE_A`, `CURVE_B` and `CURVE_PRIME`,
/// either set in the environment or in a `.env` file.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub a: i64,
    pub b: i64,
    pub prime: u64,
}

impl Settings {
    pub fn parameters(&self) -> Result<CurveParameters, CurveError> {
        CurveParameters::new(self.a, self.b, self.prime)
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    // a missing .env file is fine, plain environment variables still apply
    dotenv().ok();
    load(Environment::with_prefix("CURVE"))
}

fn load(source: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("a", 2)?
        .set_default("b", 2)?
        .set_default("prime", 17)?
        .add_source(source)
        .build()?
        .try_deserialize()
}
