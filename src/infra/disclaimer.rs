use serde::Serialize;
use tracing::info;

/// Upstream provider of the warehouse data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSource {
    MoneyPuck,
    NaturalStatTrick,
}

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::MoneyPuck => "MoneyPuck",
            DataSource::NaturalStatTrick => "NaturalStatTrick",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            DataSource::MoneyPuck => "https://moneypuck.com",
            DataSource::NaturalStatTrick => "https://naturalstattrick.com",
        }
    }

    pub fn disclaimer(&self) -> String {
        format!("Data for this query provided by {} ({}).", self.name(), self.url())
    }
}

/// Logs the attribution line unless `quiet`, and returns it for the caller to show.
pub fn announce(source: DataSource, quiet: bool) -> Option<String> {
    if quiet {
        return None;
    }
    let line = source.disclaimer();
    info!("{}", line);
    Some(line)
}
