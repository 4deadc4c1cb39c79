use crate::partition_util::{initial_split, swap_sides, ComponentView};
use crate::{Graph, InfectionError, Result, UserId};
use std::collections::BTreeSet;

pub struct KernighanLinConfig {
    /// The maximum amount of rounds before settling on the current split.
    pub max_rounds: u32,
}

impl Default for KernighanLinConfig {
    fn default() -> Self {
        Self { max_rounds: 10_000 }
    }
}

/// The infected side of a split component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bisection {
    pub infected: BTreeSet<UserId>,
    /// Relationships crossing between the two sides.
    pub edge_cut: usize,
    /// Rounds that were run, including the final one that found no improvement.
    pub rounds: u32,
    /// `false` if `max_rounds` was reached while the split was still improving.
    pub converged: bool,
}

#[derive(Copy, Clone, Debug)]
struct Swap {
    infected: usize,
    uninfected: usize,
    gain: i64,
}

impl Graph {
    /// Splits `users` into two parts while minimizing the edge cut cost.
    /// Exactly `count` users end up on the infected side.
    ///
    /// This is [Kernighan-Lin](https://en.wikipedia.org/wiki/Kernighan%E2%80%93Lin_algorithm)
    /// modified to produce sides of unequal size: every round swaps at most as many pairs as the
    /// smaller side holds.
    pub fn partition_bisection(
        &self,
        users: &BTreeSet<UserId>,
        count: usize,
        config: &KernighanLinConfig,
    ) -> Result<Bisection> {
        if count > users.len() {
            return Err(InfectionError::UnreachableGoal {
                needed: count,
                available: users.len(),
            });
        }

        let view = ComponentView::new(self, users)?;
        let mut infected = initial_split(view.len(), count);
        let pairs_per_round = count.min(view.len() - count);
        log::trace!("initial edge cut: {}", view.calculate_edge_cut(&infected));

        let mut rounds = 0;
        let mut converged = false;
        while rounds < config.max_rounds {
            rounds += 1;
            let swaps = plan_round(&view, &infected, pairs_per_round);
            let (prefix, gain) = best_prefix(&swaps);
            if gain <= 0 {
                converged = true;
                break;
            }
            for swap in &swaps[..prefix] {
                swap_sides(&mut infected, swap.infected, swap.uninfected);
            }
            log::trace!(
                "round: {rounds}, swaps: {prefix}, gain: {gain}, edge cut: {}",
                view.calculate_edge_cut(&infected)
            );
        }

        if !converged {
            log::warn!(
                "maximum number of rounds ({}) reached during Kernighan-Lin, keeping the current split",
                config.max_rounds
            );
        }

        Ok(Bisection {
            infected: view.infected_uids(&infected),
            edge_cut: view.calculate_edge_cut(&infected),
            rounds,
            converged,
        })
    }
}

/// Greedily picks the best remaining pair to swap, `pairs` times, on a working copy of the split.
/// Each picked vertex is locked for the rest of the round.
fn plan_round(view: &ComponentView, infected: &[bool], pairs: usize) -> Vec<Swap> {
    let mut working = infected.to_vec();
    let mut locked = vec![false; view.len()];
    let mut swaps = Vec::with_capacity(pairs);

    for _ in 0..pairs {
        let gains: Vec<i64> = (0..view.len())
            .map(|vx| if locked[vx] { 0 } else { view.gain(vx, &working) })
            .collect();
        let (free_infected, free_uninfected): (Vec<usize>, Vec<usize>) =
            (0..view.len()).filter(|&vx| !locked[vx]).partition(|&vx| working[vx]);

        let mut best: Option<Swap> = None;
        for &va in &free_infected {
            for &vb in &free_uninfected {
                // A direct edge between the pair stays cut after the swap.
                let gain = gains[va] + gains[vb] - 2 * i64::from(view.are_connected(va, vb));
                if best.map_or(true, |b| gain > b.gain) {
                    best = Some(Swap {
                        infected: va,
                        uninfected: vb,
                        gain,
                    });
                }
            }
        }

        let Some(swap) = best else { break };
        locked[swap.infected] = true;
        locked[swap.uninfected] = true;
        swap_sides(&mut working, swap.infected, swap.uninfected);
        swaps.push(swap);
    }
    swaps
}

/// Returns the length of the leading run of swaps with the largest total gain, and that gain.
/// The shortest such run wins ties; an empty run has gain 0.
fn best_prefix(swaps: &[Swap]) -> (usize, i64) {
    let mut best = (0, 0);
    let mut sum = 0;
    for (i, swap) in swaps.iter().enumerate() {
        sum += swap.gain;
        if sum > best.1 {
            best = (i + 1, sum);
        }
    }
    best
}
