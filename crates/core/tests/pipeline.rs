use vidrec_core::dataset::{FeatureCatalog, Interaction, InteractionTable, ItemId, UserId};
use vidrec_core::evaluation::{train_test_split, Evaluator};
use vidrec_core::similarity::SimilarityKernel;
use vidrec_core::{EvalConfig, RecError, ScorerConfig, ScoringSession};

/// Two taste clusters: users 0..5 watch comedy items 0..10, users 5..10
/// watch sports items 10..20. Every user skips two items of their cluster.
fn clustered() -> (InteractionTable, FeatureCatalog) {
    let mut rows = Vec::new();
    for user in 0..10u32 {
        let (lo, hi) = if user < 5 { (0, 10) } else { (10, 20) };
        for item in lo..hi {
            if (item + user) % 5 != 0 {
                rows.push(Interaction::new(user, item, 1.0 + ((item * 7 + user) % 4) as f32));
            }
        }
    }
    let (table, stats) = InteractionTable::from_records(rows);
    assert_eq!(stats.invalid, 0);

    let mut catalog = FeatureCatalog::new();
    for item in 0..20u32 {
        let genre = if item < 10 { "comedy" } else { "sports" };
        let sub = format!("{genre}-{}", item % 4);
        catalog.insert(ItemId(item), [genre.to_string(), sub]);
    }
    (table, catalog)
}

#[test]
fn recommendations_stay_in_taste_cluster() {
    let (table, catalog) = clustered();
    let config = ScorerConfig {
        similar_users: 3,
        ..ScorerConfig::default()
    };
    let session = ScoringSession::build(table, &catalog, config).unwrap();
    for w in [0.0, 0.5, 1.0] {
        let recs = session.recommend(UserId(1), w, 3).unwrap();
        assert!(!recs.is_empty());
        for rec in &recs {
            assert!(
                catalog.features(rec.item_id).iter().any(|t| t == "comedy"),
                "w={w}: item {} is outside the comedy cluster",
                rec.item_id
            );
        }
    }
}

#[test]
fn linear_kernel_session_builds() {
    let (table, catalog) = clustered();
    let config = ScorerConfig {
        kernel: SimilarityKernel::Linear,
        ..ScorerConfig::default()
    };
    let session = ScoringSession::build(table, &catalog, config).unwrap();
    assert_eq!(session.user_index().len(), 10);
    assert_eq!(session.item_index().len(), 20);
    assert!(!session.recommend(UserId(7), 0.5, 5).unwrap().is_empty());
}

#[test]
fn unknown_user_is_not_found() {
    let (table, catalog) = clustered();
    let session = ScoringSession::build(table, &catalog, ScorerConfig::default()).unwrap();
    assert!(matches!(
        session.recommend(UserId(1234), 0.5, 5),
        Err(RecError::NotFound { kind: "user", .. })
    ));
}

#[test]
fn split_then_evaluate() {
    let (table, catalog) = clustered();
    let eval = EvalConfig {
        k: 5,
        test_fraction: 0.3,
        relevance_threshold: 1.0,
        seed: 3,
    };
    let split = train_test_split(&table, eval.test_fraction, eval.seed);
    // exactly the four other users of the same cluster
    let config = ScorerConfig {
        similar_users: 4,
        ..ScorerConfig::default()
    };
    let session = ScoringSession::build(split.train, &catalog, config).unwrap();
    let evaluator = Evaluator::new(&session, &split.test, &catalog, eval).unwrap();
    let reports = evaluator.sweep(&[0.0, 0.5, 1.0]).unwrap();
    assert_eq!(reports.len(), 3);
    for report in &reports {
        assert_eq!(report.users_evaluated, 10);
        // neighbours and content neighbours share the user's genre tag
        assert_eq!(report.mean.hit_ratio, 1.0);
        assert!(report.mean.precision > 0.0 && report.mean.precision <= 1.0);
        assert!(report.mean.coverage > 0.0 && report.mean.coverage <= 1.0);
    }
}
