use crate::{Graph, InfectionError, Result, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct GeneratorConfig {
    /// The seed for the random number generator.
    pub rng_seed: u64,
    /// How many users the graph has.
    pub num_users: usize,
    /// Users are created in blocks of at most this size. Relationships never leave a block, so
    /// this bounds the size of every component.
    pub max_component_size: usize,
    /// The probability of any given user having students.
    pub student_probability: f64,
    /// The maximum amount of students drawn for a single coach.
    pub max_students: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rng_seed: 1,
            num_users: 1000,
            max_component_size: 50,
            student_probability: 0.1,
            max_students: 20,
        }
    }
}

impl Graph {
    /// Creates a random graph with uids `0..num_users`. The same config always yields the same graph.
    pub fn generate(config: &GeneratorConfig) -> Result<Self> {
        if config.max_component_size == 0 {
            return Err(InfectionError::invalid_range("max component size", 0));
        }
        if !(0.0..=1.0).contains(&config.student_probability) {
            return Err(InfectionError::invalid_range(
                "student probability",
                config.student_probability,
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let mut graph = Graph::new();
        let mut created = 0;

        while created < config.num_users {
            let block_size = rng.gen_range(1..=config.max_component_size);
            // Redraw rather than overshoot the number of users.
            if block_size > config.num_users - created {
                continue;
            }
            let block = created as UserId..(created + block_size) as UserId;

            for uid in block.clone() {
                graph.add_user(uid)?;
            }
            for uid in block.clone() {
                if !rng.gen_bool(config.student_probability) {
                    continue;
                }
                let num_students = rng.gen_range(0..=config.max_students);
                let students: Vec<UserId> = (0..num_students)
                    .map(|_| rng.gen_range(block.clone()))
                    .filter(|&student| student != uid)
                    .collect();
                graph.add_students(uid, students)?;
            }
            created += block_size;
        }
        log::debug!("generated {} users", graph.len());
        Ok(graph)
    }
}
