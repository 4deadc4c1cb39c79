use limited_infection::{Amount, GeneratorConfig, Graph, LimitedInfectionConfig};
use std::time;

fn main() {
    env_logger::init();
    let graph = Graph::generate(&GeneratorConfig {
        num_users: 10_000,
        max_component_size: 1000,
        student_probability: 0.8,
        max_students: 500,
        ..Default::default()
    })
    .unwrap();
    let t1 = time::Instant::now();
    let result = graph
        .limited_infection(
            Amount::Proportion(0.7),
            &LimitedInfectionConfig {
                verbose: true,
                ..Default::default()
            },
        )
        .unwrap();
    println!("time: {}ms", t1.elapsed().as_millis());
    println!(
        "components: {}, infected: {} of {}, conflicts: {}",
        graph.connected_components().len(),
        result.infected.len(),
        graph.len(),
        graph.count_conflicts(&result.infected)
    );
}
