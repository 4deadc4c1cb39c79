use limited_infection::{Graph, UserId};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three components: 0-3 with cycles, 4-8, and the lone user 9.
#[allow(dead_code)]
pub fn example_small() -> Graph {
    let mut graph = Graph::new();
    for uid in 0..10 {
        graph.add_user(uid).unwrap();
    }
    graph.add_students(0, [3]).unwrap();
    graph.add_students(1, [2]).unwrap();
    graph.add_students(2, [0, 3]).unwrap();
    graph.add_students(3, [1]).unwrap();

    graph.add_students(4, [5, 8, 6]).unwrap();
    graph.add_students(5, [6, 8]).unwrap();
    graph.add_students(6, [4]).unwrap();
    graph.add_students(7, [8]).unwrap();
    graph
}

/// Users `0..num_users` with the given coach/student pairs.
#[allow(dead_code)]
pub fn from_edges(num_users: UserId, edges: &[(UserId, UserId)]) -> Graph {
    let mut graph = Graph::new();
    for uid in 0..num_users {
        graph.add_user(uid).unwrap();
    }
    for &(coach, student) in edges {
        graph.add_students(coach, [student]).unwrap();
    }
    graph
}
