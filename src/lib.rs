// Splitting a coach/student graph into two groups while keeping as many relationships as
// possible inside a single group. Oversized components are split with Kernighan-Lin:
// https://en.wikipedia.org/wiki/Kernighan%E2%80%93Lin_algorithm

mod bisection;
mod components;
mod error;
mod generator;
mod limited;
mod partition_util;
mod registry;
mod serialize;

pub use bisection::{Bisection, KernighanLinConfig};
pub use components::Component;
pub use error::{InfectionError, Result};
pub use generator::GeneratorConfig;
pub use limited::{Amount, LimitedInfection, LimitedInfectionConfig, ParseAmountError};
pub use registry::UidRegistry;
pub use serialize::{save_infected, write_infected};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub type UserId = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    uid: UserId,
    students: BTreeSet<UserId>,
    coaches: BTreeSet<UserId>,
}

impl User {
    fn new(uid: UserId) -> Self {
        Self {
            uid,
            students: BTreeSet::new(),
            coaches: BTreeSet::new(),
        }
    }

    pub fn uid(&self) -> UserId {
        self.uid
    }

    pub fn students(&self) -> &BTreeSet<UserId> {
        &self.students
    }

    pub fn coaches(&self) -> &BTreeSet<UserId> {
        &self.coaches
    }

    /// Coaches and students in ascending order, each listed once even if it is both.
    pub fn neighbours(&self) -> impl Iterator<Item = UserId> + '_ {
        self.students.union(&self.coaches).copied()
    }
}

/// Arena of users keyed by uid. Relationships are stored as uid sets on both endpoints.
#[derive(Debug)]
pub struct Graph {
    users: BTreeMap<UserId, User>,
    registry: Arc<UidRegistry>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(UidRegistry::new()))
    }

    /// Creates an empty graph whose uids are checked against a registry shared with other graphs.
    pub fn with_registry(registry: Arc<UidRegistry>) -> Self {
        Self {
            users: BTreeMap::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<UidRegistry> {
        &self.registry
    }

    pub fn add_user(&mut self, uid: UserId) -> Result<()> {
        self.registry.register(uid)?;
        self.users.insert(uid, User::new(uid));
        Ok(())
    }

    pub(crate) fn ensure_user(&mut self, uid: UserId) -> Result<()> {
        if self.contains(uid) {
            Ok(())
        } else {
            self.add_user(uid)
        }
    }

    /// Adds students to `coach` and registers `coach` as a coach of each of them.
    /// Nothing is linked if any of the users is unknown.
    pub fn add_students<I>(&mut self, coach: UserId, students: I) -> Result<()>
    where
        I: IntoIterator<Item = UserId>,
    {
        let students = self.known_users(students)?;
        self.check_known(coach)?;
        for student in students {
            self.link(coach, student);
        }
        Ok(())
    }

    /// Adds coaches to `student` and registers `student` as a student of each of them.
    pub fn add_coaches<I>(&mut self, student: UserId, coaches: I) -> Result<()>
    where
        I: IntoIterator<Item = UserId>,
    {
        let coaches = self.known_users(coaches)?;
        self.check_known(student)?;
        for coach in coaches {
            self.link(coach, student);
        }
        Ok(())
    }

    fn known_users<I>(&self, uids: I) -> Result<Vec<UserId>>
    where
        I: IntoIterator<Item = UserId>,
    {
        uids.into_iter()
            .map(|uid| self.check_known(uid).map(|_| uid))
            .collect()
    }

    fn check_known(&self, uid: UserId) -> Result<()> {
        if self.contains(uid) {
            Ok(())
        } else {
            Err(InfectionError::UnknownUser(uid))
        }
    }

    fn link(&mut self, coach: UserId, student: UserId) {
        if coach == student {
            log::warn!("ignoring user {coach} coaching themselves");
            return;
        }
        if let Some(user) = self.users.get_mut(&coach) {
            user.students.insert(student);
        }
        if let Some(user) = self.users.get_mut(&student) {
            user.coaches.insert(coach);
        }
    }

    /// Removes every user and releases their uids, in order to create a new group of users.
    /// Uids held by other graphs sharing the registry stay taken.
    pub fn clear_users(&mut self) {
        self.registry.release(self.users.keys().copied());
        self.users.clear();
    }

    pub fn user(&self, uid: UserId) -> Option<&User> {
        self.users.get(&uid)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.values()
    }

    pub fn uids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    pub fn contains(&self, uid: UserId) -> bool {
        self.users.contains_key(&uid)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Coaches and students of `uid`.
    pub fn neighbours(&self, uid: UserId) -> Result<BTreeSet<UserId>> {
        self.users
            .get(&uid)
            .map(|user| user.neighbours().collect())
            .ok_or(InfectionError::UnknownUser(uid))
    }

    pub fn are_connected(&self, a: UserId, b: UserId) -> bool {
        self.users
            .get(&a)
            .map_or(false, |user| user.students.contains(&b) || user.coaches.contains(&b))
    }

    /// Returns the number of related pairs of users with exactly one infected party.
    pub fn count_conflicts(&self, infected: &BTreeSet<UserId>) -> usize {
        // Each pair is counted from its lower uid, even if both coach each other.
        self.users
            .values()
            .flat_map(|user| {
                user.neighbours()
                    .filter(move |n| *n > user.uid)
                    .map(move |n| (user.uid, n))
            })
            .filter(|(a, b)| infected.contains(a) != infected.contains(b))
            .count()
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.registry.release(self.users.keys().copied());
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationships_are_symmetric() {
        let graph = fixtures::example_small();
        for user in graph.users() {
            for student in user.students() {
                assert!(graph.user(*student).unwrap().coaches().contains(&user.uid()));
            }
            for coach in user.coaches() {
                assert!(graph.user(*coach).unwrap().students().contains(&user.uid()));
            }
        }
    }

    #[test]
    fn add_coaches_mirrors_add_students() {
        let mut graph = Graph::new();
        graph.add_user(1).unwrap();
        graph.add_user(2).unwrap();
        graph.add_coaches(2, [1]).unwrap();

        assert!(graph.user(1).unwrap().students().contains(&2));
        assert!(graph.are_connected(2, 1));
    }

    #[test]
    fn unknown_student_links_nothing() {
        let mut graph = Graph::new();
        graph.add_user(1).unwrap();
        graph.add_user(2).unwrap();

        let err = graph.add_students(1, [2, 5]).unwrap_err();
        assert!(matches!(err, InfectionError::UnknownUser(5)));
        assert!(graph.user(1).unwrap().students().is_empty());
    }

    #[test]
    fn duplicate_user_keeps_existing_one() {
        let mut graph = Graph::new();
        graph.add_user(1).unwrap();
        graph.add_user(2).unwrap();
        graph.add_students(1, [2]).unwrap();

        assert!(matches!(
            graph.add_user(1),
            Err(InfectionError::DuplicateIdentifier(1))
        ));
        assert!(graph.are_connected(1, 2));
    }

    #[test]
    fn shared_registry_spans_graphs() {
        let registry = Arc::new(UidRegistry::new());
        let mut first = Graph::with_registry(registry.clone());
        let mut second = Graph::with_registry(registry.clone());
        first.add_user(1).unwrap();
        second.add_user(2).unwrap();

        assert!(second.add_user(1).is_err());

        first.clear_users();
        assert!(first.is_empty());
        assert!(matches!(
            first.add_user(2),
            Err(InfectionError::DuplicateIdentifier(2))
        ));
        assert!(second.contains(2));

        second.add_user(1).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn dropped_graph_releases_its_uids() {
        let registry = Arc::new(UidRegistry::new());
        let mut kept = Graph::with_registry(registry.clone());
        kept.add_user(1).unwrap();
        {
            let mut dropped = Graph::with_registry(registry.clone());
            dropped.add_user(2).unwrap();
        }
        assert_eq!(registry.len(), 1);
        kept.add_user(2).unwrap();
    }

    #[test]
    fn graph_neighbours() {
        let graph = fixtures::example_small();
        assert_eq!(graph.neighbours(2).unwrap(), BTreeSet::from([0, 1, 3]));
        assert!(graph.neighbours(9).unwrap().is_empty());
        assert!(matches!(
            graph.neighbours(42),
            Err(InfectionError::UnknownUser(42))
        ));
    }

    #[test]
    fn self_link_is_ignored() {
        let mut graph = Graph::new();
        graph.add_user(1).unwrap();
        graph.add_students(1, [1]).unwrap();
        assert!(graph.user(1).unwrap().neighbours().next().is_none());
    }

    #[test]
    fn conflicts_count_each_relationship_once() {
        let graph = fixtures::example_small();
        assert_eq!(graph.count_conflicts(&BTreeSet::from([0, 1, 2, 3])), 0);
        // 0 has coach 2 and student 3.
        assert_eq!(graph.count_conflicts(&BTreeSet::from([0])), 2);
        assert_eq!(graph.count_conflicts(&BTreeSet::from([9, 0])), 2);
    }

    #[test]
    fn mutual_coaching_is_one_conflict() {
        let mut graph = Graph::new();
        graph.add_user(1).unwrap();
        graph.add_user(2).unwrap();
        graph.add_students(1, [2]).unwrap();
        graph.add_students(2, [1]).unwrap();
        assert_eq!(graph.count_conflicts(&BTreeSet::from([1])), 1);
    }
}
