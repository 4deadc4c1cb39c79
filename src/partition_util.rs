use crate::{Graph, InfectionError, Result, UserId};
use std::collections::BTreeSet;

/// A set of users re-indexed to `0..len` with adjacency restricted to the set.
pub(crate) struct ComponentView {
    uids: Vec<UserId>,
    /// Sorted local neighbour indices per vertex.
    adjacency: Vec<Vec<usize>>,
}

impl ComponentView {
    pub(crate) fn new(graph: &Graph, users: &BTreeSet<UserId>) -> Result<Self> {
        let uids: Vec<UserId> = users.iter().copied().collect();
        let adjacency = uids
            .iter()
            .map(|uid| {
                let user = graph.user(*uid).ok_or(InfectionError::UnknownUser(*uid))?;
                // `uids` is sorted, so mapping ascending neighbours keeps the list sorted.
                Ok(user
                    .neighbours()
                    .filter_map(|n| uids.binary_search(&n).ok())
                    .collect())
            })
            .collect::<Result<Vec<Vec<usize>>>>()?;
        Ok(Self { uids, adjacency })
    }

    pub(crate) fn len(&self) -> usize {
        self.uids.len()
    }

    pub(crate) fn uid(&self, vx: usize) -> UserId {
        self.uids[vx]
    }

    pub(crate) fn are_connected(&self, va: usize, vb: usize) -> bool {
        self.adjacency[va].binary_search(&vb).is_ok()
    }

    /// Returns how many edges the cut loses if `vx` changes sides: external minus internal degree.
    pub(crate) fn gain(&self, vx: usize, infected: &[bool]) -> i64 {
        let side = infected[vx];
        self.adjacency[vx].iter().fold(0, |gain, &n| {
            if infected[n] == side {
                gain - 1
            } else {
                gain + 1
            }
        })
    }

    pub(crate) fn calculate_edge_cut(&self, infected: &[bool]) -> usize {
        let mut edge_cut = 0;
        for (vx, neighbours) in self.adjacency.iter().enumerate() {
            edge_cut += neighbours
                .iter()
                .filter(|&&n| infected[n] != infected[vx])
                .count();
        }
        edge_cut / 2
    }

    pub(crate) fn infected_uids(&self, infected: &[bool]) -> BTreeSet<UserId> {
        (0..self.len())
            .filter(|&vx| infected[vx])
            .map(|vx| self.uid(vx))
            .collect()
    }
}

/// Marks the first `count` vertices as infected. The split only has to have the right size.
pub(crate) fn initial_split(len: usize, count: usize) -> Vec<bool> {
    (0..len).map(|vx| vx < count).collect()
}

pub(crate) fn swap_sides(infected: &mut [bool], va: usize, vb: usize) {
    infected.swap(va, vb);
}
