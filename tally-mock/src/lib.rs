//! Deterministic in-memory sources for tests and demos.
//!
//! Fixtures cover two countries, `"Mexico"` and `"Philippines"`, for two
//! datasets: weekly case counts and cumulative excess deaths. Some rows have
//! no value so fill policies can be exercised.
use tally_core::{ObservationSource, SourceFrame, TallyError};

mod fixtures;

/// Countries with fixture data.
pub const COUNTRIES: [&str; 2] = ["Mexico", "Philippines"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dataset {
    WeeklyCases,
    CumulativeDeaths,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Behavior {
    Single(String),
    Grouped(Vec<String>),
    Fail,
}

/// Mock source serving static fixtures.
#[derive(Debug, Clone)]
pub struct MockSource {
    dataset: Dataset,
    behavior: Behavior,
    label: Option<String>,
}

impl MockSource {
    /// Weekly confirmed cases of one country, labelled with the country name.
    pub fn weekly_cases(country: impl Into<String>) -> Self {
        Self {
            dataset: Dataset::WeeklyCases,
            behavior: Behavior::Single(country.into()),
            label: None,
        }
    }

    /// Cumulative excess deaths of one country, labelled with the country name.
    pub fn cumulative_deaths(country: impl Into<String>) -> Self {
        Self {
            dataset: Dataset::CumulativeDeaths,
            behavior: Behavior::Single(country.into()),
            label: None,
        }
    }

    /// Weekly cases of every fixture country in one frame, each row tagged
    /// with its country as the group key.
    #[must_use]
    pub fn weekly_cases_grouped() -> Self {
        Self {
            dataset: Dataset::WeeklyCases,
            behavior: Behavior::Grouped(COUNTRIES.iter().map(|c| (*c).to_string()).collect()),
            label: None,
        }
    }

    /// A source whose `load` always fails with an `Io` error.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            dataset: Dataset::WeeklyCases,
            behavior: Behavior::Fail,
            label: None,
        }
    }

    /// Override the frame label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn table(&self, country: &str) -> Result<&'static [(&'static str, Option<f64>)], TallyError> {
        let found = match self.dataset {
            Dataset::WeeklyCases => fixtures::weekly::by_country(country),
            Dataset::CumulativeDeaths => fixtures::deaths::by_country(country),
        };
        found.ok_or_else(|| TallyError::InvalidArg(format!("no fixture data for '{country}'")))
    }
}

impl ObservationSource for MockSource {
    fn name(&self) -> &str {
        "tally-mock"
    }

    fn load(&self) -> Result<SourceFrame, TallyError> {
        let (default_label, rows) = match &self.behavior {
            Behavior::Fail => {
                return Err(TallyError::io("mock://fail", "forced failure"));
            }
            Behavior::Single(country) => {
                (country.clone(), fixtures::rows(self.table(country)?, None)?)
            }
            Behavior::Grouped(countries) => {
                let mut rows = Vec::new();
                for country in countries {
                    rows.extend(fixtures::rows(self.table(country)?, Some(country.as_str()))?);
                }
                ("all".to_string(), rows)
            }
        };
        Ok(SourceFrame {
            label: self.label.clone().unwrap_or(default_label),
            rows,
        })
    }
}
