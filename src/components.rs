use crate::{Graph, InfectionError, Result, UserId};
use std::collections::BTreeSet;

/// A maximal set of users connected through coach/student relationships.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    users: BTreeSet<UserId>,
}

impl Component {
    pub fn users(&self) -> &BTreeSet<UserId> {
        &self.users
    }

    pub fn into_users(self) -> BTreeSet<UserId> {
        self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, uid: UserId) -> bool {
        self.users.contains(&uid)
    }
}

impl Graph {
    /// Infects every user reachable from `seed` through coaches and students.
    pub fn total_infection(&self, seed: UserId) -> Result<BTreeSet<UserId>> {
        if !self.contains(seed) {
            return Err(InfectionError::UnknownUser(seed));
        }
        Ok(self.collect_component(seed))
    }

    fn collect_component(&self, seed: UserId) -> BTreeSet<UserId> {
        let mut infected = BTreeSet::new();
        let mut stack = vec![seed];

        while let Some(uid) = stack.pop() {
            // The graph can be cyclic, so a user may have been pushed again before being visited.
            if !infected.insert(uid) {
                continue;
            }
            if let Some(user) = self.user(uid) {
                stack.extend(user.neighbours().filter(|n| !infected.contains(n)));
            }
        }
        infected
    }

    /// Splits the whole population into its connected components, in order of their smallest uid.
    pub fn connected_components(&self) -> Vec<Component> {
        let mut claimed = BTreeSet::new();
        let mut components = Vec::new();

        for uid in self.uids() {
            if claimed.contains(&uid) {
                continue;
            }
            let users = self.collect_component(uid);
            claimed.extend(users.iter().copied());
            components.push(Component { users });
        }
        log::debug!(
            "found {} components among {} users",
            components.len(),
            self.len()
        );
        components
    }
}
