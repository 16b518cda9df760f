//! Scoring session: the explicit context every recommendation is computed in.

use crate::config::ScorerConfig;
use crate::dataset::{FeatureCatalog, InteractionTable, ItemId, UserId};
use crate::error::{RecError, Result};
use crate::recommend::hybrid::{blend, validate_content_weight};
use crate::recommend::scores::ScoreMap;
use crate::recommend::types::Recommendation;
use crate::similarity::{item_similarity, user_similarity, SimilarityMatrix};

/// Interaction table plus both similarity matrices and the scorer settings.
#[derive(Debug, Clone)]
pub struct ScoringSession {
    interactions: InteractionTable,
    users: SimilarityMatrix<UserId>,
    items: SimilarityMatrix<ItemId>,
    config: ScorerConfig,
}

impl ScoringSession {
    /// Builds the user × user matrix from `interactions` and the item × item
    /// matrix from the TF-IDF vectors of `catalog`, both with `config.kernel`.
    pub fn build(
        interactions: InteractionTable,
        catalog: &FeatureCatalog,
        config: ScorerConfig,
    ) -> Result<Self> {
        config.validate()?;
        if interactions.is_empty() {
            return Err(RecError::EmptyInput("interaction table".to_string()));
        }
        tracing::info!(
            "Building scoring session: {} interactions, {} users, {} cataloged items",
            interactions.len(),
            interactions.users().len(),
            catalog.len()
        );
        let users = user_similarity(&interactions, config.kernel);
        let items = item_similarity(catalog, config.kernel);
        Ok(Self {
            interactions,
            users,
            items,
            config,
        })
    }

    /// Assembles a session from prebuilt matrices.
    pub fn from_parts(
        interactions: InteractionTable,
        users: SimilarityMatrix<UserId>,
        items: SimilarityMatrix<ItemId>,
        config: ScorerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            interactions,
            users,
            items,
            config,
        })
    }

    /// Scorer settings the session was built with.
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Interaction log backing histories and the collaborative component.
    pub fn interactions(&self) -> &InteractionTable {
        &self.interactions
    }

    /// User × user similarity matrix.
    pub fn user_index(&self) -> &SimilarityMatrix<UserId> {
        &self.users
    }

    /// Item × item content similarity matrix.
    pub fn item_index(&self) -> &SimilarityMatrix<ItemId> {
        &self.items
    }

    /// Whether `user` can be scored, i.e. is in the user similarity index.
    pub fn contains_user(&self, user: UserId) -> bool {
        self.users.contains(user)
    }

    fn ensure_user(&self, user: UserId) -> Result<()> {
        if self.users.contains(user) {
            Ok(())
        } else {
            Err(RecError::not_found("user", user))
        }
    }

    /// Raw collaborative scores: the engagement ratios of the top-N most
    /// similar users with positive similarity, averaged over those kept (a
    /// neighbour who never watched an item contributes 0). Items are seen in
    /// neighbour rank order, each neighbour's history by descending
    /// engagement. Empty when no other user has positive similarity.
    pub fn collaborative_component(&self, user: UserId) -> Result<ScoreMap> {
        let neighbours: Vec<(UserId, f32)> = self
            .users
            .most_similar(user, self.config.similar_users)?
            .into_iter()
            .filter(|&(_, similarity)| similarity > 0.0)
            .collect();
        let mut scores = ScoreMap::new();
        if neighbours.is_empty() {
            return Ok(scores);
        }
        for &(neighbour, _) in &neighbours {
            for (item, ratio) in self.interactions.history(neighbour) {
                scores.add(item, ratio);
            }
        }
        scores.scale(1.0 / neighbours.len() as f32);
        Ok(scores)
    }

    /// Raw content scores: for each of the user's K most engaged items, its
    /// top-M content neighbours with positive similarity, summed per item.
    /// History items without feature vectors contribute nothing.
    pub fn content_component(&self, user: UserId) -> Result<ScoreMap> {
        self.ensure_user(user)?;
        let mut scores = ScoreMap::new();
        let history = self.interactions.history(user);
        for &(source, _) in history.iter().take(self.config.source_items) {
            if !self.items.contains(source) {
                tracing::debug!("Item {} has no feature vector, skipped", source);
                continue;
            }
            for (item, similarity) in self.items.most_similar(source, self.config.similar_items)? {
                if similarity > 0.0 {
                    scores.add(item, similarity);
                }
            }
        }
        Ok(scores)
    }

    /// Ranked unseen items for `user`.
    ///
    /// Both components are normalised by their own maximum, blended with
    /// `content_weight` (collaborative weight is `1 - content_weight`), items
    /// in the user's history are removed and the rest are sorted by
    /// descending score. Equal scores keep first-seen order, so a longer
    /// `result_length` only ever extends a shorter result.
    pub fn recommend(
        &self,
        user: UserId,
        content_weight: f32,
        result_length: usize,
    ) -> Result<Vec<Recommendation>> {
        validate_content_weight(content_weight)?;
        if result_length == 0 {
            return Err(RecError::invalid("result_length", result_length, "> 0"));
        }
        self.ensure_user(user)?;

        let mut collaborative = self.collaborative_component(user)?;
        let mut content = self.content_component(user)?;
        collaborative.normalize_by_max();
        content.normalize_by_max();

        let mut scores = blend(&content, &collaborative, content_weight);
        scores.retain(|item, _| !self.interactions.has_interacted(user, item));

        tracing::debug!(
            "User {}: {} collaborative, {} content, {} unseen candidates",
            user,
            collaborative.len(),
            content.len(),
            scores.len()
        );

        Ok(scores
            .ranked()
            .into_iter()
            .take(result_length)
            .map(|(item_id, score)| Recommendation { item_id, score })
            .collect())
    }

    /// [`recommend`](Self::recommend) for several users, failing on the first
    /// unknown one.
    pub fn recommend_many(
        &self,
        users: &[UserId],
        content_weight: f32,
        result_length: usize,
    ) -> Result<Vec<(UserId, Vec<Recommendation>)>> {
        users
            .iter()
            .map(|&user| Ok((user, self.recommend(user, content_weight, result_length)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Interaction;
    use crate::similarity::{SimilarityKernel, SparseVector};

    fn catalog() -> FeatureCatalog {
        let mut c = FeatureCatalog::new();
        c.insert(ItemId(1), ["comedy"]);
        c.insert(ItemId(2), ["comedy", "pets"]);
        c.insert(ItemId(3), ["sports"]);
        c.insert(ItemId(4), ["sports", "news"]);
        c.insert(ItemId(5), ["pets"]);
        c
    }

    fn session() -> ScoringSession {
        let table: InteractionTable = vec![
            Interaction::new(1, 1, 3.0),
            Interaction::new(1, 3, 0.5),
            Interaction::new(2, 1, 2.0),
            Interaction::new(2, 2, 4.0),
            Interaction::new(2, 3, 0.5),
            Interaction::new(3, 4, 1.0),
            Interaction::new(3, 5, 1.0),
        ]
        .into_iter()
        .collect();
        ScoringSession::build(table, &catalog(), ScorerConfig::default()).unwrap()
    }

    #[test]
    fn test_unknown_user_not_found() {
        let s = session();
        assert_eq!(
            s.recommend(UserId(99), 0.5, 5).unwrap_err(),
            RecError::not_found("user", 99)
        );
        assert!(s.content_component(UserId(99)).is_err());
        assert!(s.collaborative_component(UserId(99)).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        let s = session();
        assert!(matches!(
            s.recommend(UserId(1), 1.5, 5),
            Err(RecError::InvalidParameter { name: "content_weight", .. })
        ));
        assert!(matches!(
            s.recommend(UserId(1), 0.5, 0),
            Err(RecError::InvalidParameter { name: "result_length", .. })
        ));
    }

    #[test]
    fn test_never_recommends_history() {
        let s = session();
        for w in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for rec in s.recommend(UserId(1), w, 10).unwrap() {
                assert!(!s.interactions().has_interacted(UserId(1), rec.item_id));
            }
        }
    }

    #[test]
    fn test_collaborative_average_over_neighbours() {
        let s = session();
        // user 3 shares no items with user 1, so only user 2 is averaged
        let collab = s.collaborative_component(UserId(1)).unwrap();
        assert!((collab.get(ItemId(2)).unwrap() - 4.0).abs() < 1e-6);
        assert!(!collab.contains(ItemId(4)));
        assert!(!collab.contains(ItemId(5)));
    }

    #[test]
    fn test_dissimilar_users_fall_back_to_content() {
        let table: InteractionTable = vec![
            Interaction::new(1, 1, 1.0),
            Interaction::new(2, 2, 1.0),
            Interaction::new(3, 3, 1.0),
        ]
        .into_iter()
        .collect();
        let mut catalog = FeatureCatalog::new();
        catalog.insert(ItemId(1), ["comedy"]);
        catalog.insert(ItemId(2), ["sports"]);
        catalog.insert(ItemId(3), ["news"]);
        catalog.insert(ItemId(5), ["comedy"]);
        let s = ScoringSession::build(table, &catalog, ScorerConfig::default()).unwrap();

        assert!(s.collaborative_component(UserId(1)).unwrap().is_empty());
        let recs = s.recommend(UserId(1), 0.5, 10).unwrap();
        let ids: Vec<ItemId> = recs.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, vec![ItemId(5)]);
        assert!((recs[0].score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_user_without_history_gets_collaborative_only() {
        let table: InteractionTable = vec![
            Interaction::new(1, 1, 3.0),
            Interaction::new(1, 2, 1.0),
            Interaction::new(2, 3, 2.0),
        ]
        .into_iter()
        .collect();
        // user 9 is indexed but has no rows in the interaction table
        let users = SimilarityMatrix::from_vectors(
            "user",
            vec![
                (UserId(1), SparseVector::from_pairs(vec![(0, 1.0)])),
                (UserId(2), SparseVector::from_pairs(vec![(1, 1.0)])),
                (UserId(9), SparseVector::from_pairs(vec![(0, 2.0), (1, 1.0)])),
            ],
            SimilarityKernel::Cosine,
        );
        let items = item_similarity(&catalog(), SimilarityKernel::Cosine);
        let s = ScoringSession::from_parts(table, users, items, ScorerConfig::default()).unwrap();

        assert!(s.content_component(UserId(9)).unwrap().is_empty());
        let mut collab = s.collaborative_component(UserId(9)).unwrap();
        assert!(!collab.is_empty());
        collab.normalize_by_max();
        let expected: Vec<ItemId> = collab.ranked().iter().map(|&(item, _)| item).collect();
        for w in [0.0, 0.3, 0.7] {
            let recs = s.recommend(UserId(9), w, 10).unwrap();
            let ids: Vec<ItemId> = recs.iter().map(|r| r.item_id).collect();
            assert_eq!(ids, expected);
            assert!((recs[0].score - (1.0 - w)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_from_parts_validates_config() {
        let table: InteractionTable = vec![Interaction::new(1, 1, 1.0)].into_iter().collect();
        let users = user_similarity(&table, SimilarityKernel::Cosine);
        let items = item_similarity(&catalog(), SimilarityKernel::Cosine);
        let config = ScorerConfig {
            similar_users: 0,
            ..ScorerConfig::default()
        };
        assert!(matches!(
            ScoringSession::from_parts(table, users, items, config),
            Err(RecError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_content_sums_positive_similarities() {
        let s = session();
        let content = s.content_component(UserId(1)).unwrap();
        // item 2 shares "comedy" with item 1, item 4 shares "sports" with item 3
        assert!(content.get(ItemId(2)).unwrap() > 0.0);
        assert!(content.get(ItemId(4)).unwrap() > 0.0);
        // item 5 shares nothing with items 1 or 3
        assert!(!content.contains(ItemId(5)));
    }

    #[test]
    fn test_blend_formula_for_shared_item() {
        let s = session();
        let w = 0.3;
        let mut content = s.content_component(UserId(1)).unwrap();
        let mut collab = s.collaborative_component(UserId(1)).unwrap();
        content.normalize_by_max();
        collab.normalize_by_max();
        let expected = w * content.get(ItemId(2)).unwrap()
            + (1.0 - w) * collab.get(ItemId(2)).unwrap();
        let recs = s.recommend(UserId(1), w, 10).unwrap();
        let got = recs.iter().find(|r| r.item_id == ItemId(2)).unwrap().score;
        assert!((got - expected).abs() < 1e-6);
    }

    #[test]
    fn test_single_user_falls_back_to_content() {
        let table: InteractionTable = vec![Interaction::new(1, 1, 1.0)].into_iter().collect();
        let s = ScoringSession::build(table, &catalog(), ScorerConfig::default()).unwrap();
        assert!(s.collaborative_component(UserId(1)).unwrap().is_empty());
        let recs = s.recommend(UserId(1), 0.5, 10).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item_id, ItemId(2));
        // collaborative half is missing, so the best content item scores w * 1.0
        assert!((recs[0].score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_both_components_empty() {
        let table: InteractionTable = vec![Interaction::new(1, 42, 1.0)].into_iter().collect();
        let s = ScoringSession::build(table, &FeatureCatalog::new(), ScorerConfig::default())
            .unwrap();
        assert!(s.recommend(UserId(1), 0.5, 10).unwrap().is_empty());
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = ScoringSession::build(
            InteractionTable::new(),
            &catalog(),
            ScorerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RecError::EmptyInput(_)));
    }

    #[test]
    fn test_recommend_many() {
        let s = session();
        let all = s.recommend_many(&[UserId(1), UserId(3)], 0.5, 3).unwrap();
        assert_eq!(all.len(), 2);
        assert!(s.recommend_many(&[UserId(1), UserId(7)], 0.5, 3).is_err());
    }
}
