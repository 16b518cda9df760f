//! Per-user train/test split.

use crate::dataset::{Interaction, InteractionTable};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Training and held-out interactions.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: InteractionTable,
    pub test: InteractionTable,
}

/// Holds out `round(n * test_fraction)` shuffled rows of every user.
///
/// Users with a single row stay entirely in train, and at least one row of
/// every user is always kept for training so the user can still be scored.
/// The shuffle is seeded, and users are visited in ascending id order, so the
/// split is reproducible.
pub fn train_test_split(
    interactions: &InteractionTable,
    test_fraction: f64,
    seed: u64,
) -> TrainTestSplit {
    let fraction = test_fraction.clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = InteractionTable::new();
    let mut test = InteractionTable::new();

    for user in interactions.users() {
        let mut rows: Vec<Interaction> = interactions.user_rows(user).copied().collect();
        rows.shuffle(&mut rng);
        let held_out = ((rows.len() as f64) * fraction).round() as usize;
        let held_out = held_out.min(rows.len().saturating_sub(1));
        let (test_rows, train_rows) = rows.split_at(held_out);
        for row in train_rows {
            train.insert(*row);
        }
        for row in test_rows {
            test.insert(*row);
        }
    }

    tracing::info!(
        "Split {} interactions into {} train / {} test",
        interactions.len(),
        train.len(),
        test.len()
    );
    TrainTestSplit { train, test }
}
