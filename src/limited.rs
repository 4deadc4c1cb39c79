use crate::{Bisection, Component, Graph, InfectionError, KernighanLinConfig, Result, UserId};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A number of users, given either directly or as a share of the population.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Amount {
    Count(i64),
    /// Between 0 and 1. Truncated to a whole number of users.
    Proportion(f64),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Count(0)
    }
}

impl Amount {
    /// Converts to a number of users out of `population`.
    pub fn resolve(self, population: usize, what: &'static str) -> Result<usize> {
        match self {
            Amount::Count(count) => {
                usize::try_from(count).map_err(|_| InfectionError::invalid_range(what, count))
            }
            Amount::Proportion(share) if (0.0..=1.0).contains(&share) => {
                Ok((share * population as f64) as usize)
            }
            Amount::Proportion(share) => Err(InfectionError::invalid_range(what, share)),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Count(count) => write!(f, "{count}"),
            Amount::Proportion(share) => write!(f, "{share}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected a number of users or a proportion, got {0:?}")]
pub struct ParseAmountError(String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Integers are counts, any other number is a proportion.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(count) = s.parse::<i64>() {
            return Ok(Amount::Count(count));
        }
        s.parse::<f64>()
            .map(Amount::Proportion)
            .map_err(|_| ParseAmountError(s.to_string()))
    }
}

#[derive(Default)]
pub struct LimitedInfectionConfig {
    /// How far the number of infected users may be from the target. A larger tolerance makes it
    /// more likely that whole components are enough and no relationship is broken.
    pub tolerance: Amount,
    /// Log the number of conflicting relationships at info level.
    pub verbose: bool,
    /// Used when a component has to be split.
    pub refinement: KernighanLinConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitedInfection {
    pub infected: BTreeSet<UserId>,
    /// Present if a component had to be split to reach the target.
    pub split: Option<Bisection>,
}

impl LimitedInfection {
    /// Number of relationships broken by the split, zero if whole components were enough.
    pub fn conflicts(&self) -> usize {
        self.split.as_ref().map_or(0, |split| split.edge_cut)
    }
}

impl Graph {
    /// Infects `target` users while minimizing the coach/student relationships that end up with
    /// only one infected party.
    pub fn limited_infection(
        &self,
        target: Amount,
        config: &LimitedInfectionConfig,
    ) -> Result<LimitedInfection> {
        let population = self.len();
        let count = target.resolve(population, "number of users to infect")?;
        if count > population {
            return Err(InfectionError::invalid_range(
                "number of users to infect",
                format!("{count} (only {population} users)"),
            ));
        }
        let tolerance = config.tolerance.resolve(population, "tolerance")?;

        let components = self.connected_components();
        self.pack_components(components, count, tolerance, config)
    }

    /// Infects whole components, largest first, as long as they fit into `target`.
    /// If that misses `target` by more than `tolerance`, the smallest component that did not fit
    /// is split to make up the difference exactly.
    pub fn pack_components(
        &self,
        mut components: Vec<Component>,
        target: usize,
        tolerance: usize,
        config: &LimitedInfectionConfig,
    ) -> Result<LimitedInfection> {
        components.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut infected = BTreeSet::new();
        let mut split_candidate = None;
        for component in components {
            if infected.len() + component.len() > target {
                split_candidate = Some(component);
                continue;
            }
            infected.extend(component.into_users());
        }

        let remaining = target - infected.len();
        if remaining <= tolerance {
            log::debug!("{} users infected without any conflicts", infected.len());
            return Ok(LimitedInfection {
                infected,
                split: None,
            });
        }

        let available = split_candidate.as_ref().map_or(0, Component::len);
        let candidate = match split_candidate {
            Some(component) if component.len() >= remaining => component,
            _ => {
                return Err(InfectionError::UnreachableGoal {
                    needed: remaining,
                    available,
                })
            }
        };
        log::debug!(
            "splitting {} users off a component of {}",
            remaining,
            candidate.len()
        );

        let split = self.partition_bisection(candidate.users(), remaining, &config.refinement)?;
        if config.verbose {
            log::info!("number of conflicting relationships: {}", split.edge_cut);
        }
        infected.extend(split.infected.iter().copied());

        Ok(LimitedInfection {
            infected,
            split: Some(split),
        })
    }
}
