//! Duplicate detection: orchestrates the proximity index, text scorer and
//! score combiner, then flags/links duplicates through the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use complaint_store::{window_start, CandidateFilter, Complaint, ComplaintStore};
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::config::DetectionConfig;
use crate::errors::SimilarityError;
use crate::proximity::{GeoProximityIndex, ProximityHit};
use crate::score;
use crate::text::text_similarity;
use crate::types::{DetectionOutcome, SimilarityResult};

/// Per-complaint duplicate detection over a shared store.
///
/// All state is per-request; the detector itself only holds configuration
/// and a store handle, so one instance serves concurrent submissions.
pub struct DuplicateDetector<S> {
    store: Arc<S>,
    index: GeoProximityIndex<S>,
    cfg: DetectionConfig,
}

impl<S: ComplaintStore> DuplicateDetector<S> {
    /// # Errors
    /// Returns `SimilarityError::Config` for invalid configuration.
    pub fn new(store: Arc<S>, cfg: DetectionConfig) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(Self {
            index: GeoProximityIndex::new(store.clone()),
            store,
            cfg,
        })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.cfg
    }

    /// Ranked similarity query, read-only: no flagging, no linkage.
    ///
    /// Candidates share the complaint's category, fall inside the configured
    /// time window and radius, and exclude the complaint itself. Results are
    /// descending by overall similarity; ties prefer the closer candidate,
    /// then the older one (link to the original report).
    ///
    /// # Errors
    /// `InvalidGeometry` for a malformed location; `IndexQueryFailed` when
    /// the store scan keeps failing after bounded retries.
    pub async fn rank_similar(
        &self,
        complaint: &Complaint,
    ) -> Result<Vec<SimilarityResult>, SimilarityError> {
        trace!("DuplicateDetector::rank_similar id={}", complaint.id);
        let filter = CandidateFilter {
            category: Some(complaint.category),
            min_created_at: Some(window_start(self.cfg.time_window_days)),
            exclude_id: Some(complaint.id.clone()),
        };

        let hits = self.query_with_retry(complaint, &filter).await?;
        let own_text = complaint.text();

        let mut results: Vec<SimilarityResult> = hits
            .into_iter()
            .map(|hit| self.score_hit(complaint, &own_text, hit))
            .collect();

        results.sort_by(|a, b| {
            b.overall_similarity
                .total_cmp(&a.overall_similarity)
                .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
                .then_with(|| a.candidate_created_at.cmp(&b.candidate_created_at))
        });
        results.truncate(self.cfg.top_k);

        debug!(
            "rank_similar id={} candidates={} top={:?}",
            complaint.id,
            results.len(),
            results.first().map(|r| r.overall_similarity)
        );
        Ok(results)
    }

    /// Runs detection for a newly created complaint.
    ///
    /// When the best candidate clears the duplicate threshold, the complaint
    /// is flagged and linked to it bidirectionally. A linkage failure after
    /// retries degrades to a `link_warning` on the outcome; the scored
    /// results are still returned.
    ///
    /// # Errors
    /// Same as [`rank_similar`](Self::rank_similar). No candidates found is
    /// not an error.
    pub async fn detect(&self, complaint: &Complaint) -> Result<DetectionOutcome, SimilarityError> {
        let matches = self.rank_similar(complaint).await?;
        let mut outcome = DetectionOutcome {
            matches,
            is_duplicate: false,
            link_warning: None,
        };

        let Some(best) = outcome.matches.first() else {
            return Ok(outcome);
        };
        if best.overall_similarity < self.cfg.duplicate_threshold {
            return Ok(outcome);
        }

        outcome.is_duplicate = true;
        let best_id = best.candidate_id.clone();
        debug!(
            "duplicate detected id={} best={} score={:.3}",
            complaint.id, best_id, best.overall_similarity
        );

        if let Err(err) = self.link_with_retry(&complaint.id, &best_id).await {
            warn!("link update failed for {} <-> {best_id}: {err}", complaint.id);
            outcome.link_warning = Some(err.to_string());
        }

        Ok(outcome)
    }

    /// Idempotent reconciliation pass over complaints created after `since`.
    ///
    /// Re-runs detection to fill in links missed by near-simultaneous
    /// submissions (the accepted read-then-write race at intake). Add-to-set
    /// linkage makes repeated passes harmless. Returns how many complaints
    /// ended up flagged as duplicates.
    pub async fn reconcile(&self, since: DateTime<Utc>) -> Result<usize, SimilarityError> {
        let recent = self
            .store
            .scan_candidates(&CandidateFilter {
                min_created_at: Some(since),
                ..CandidateFilter::default()
            })
            .await
            .map_err(SimilarityError::IndexQueryFailed)?;

        debug!("reconcile since={since} candidates={}", recent.len());
        let mut flagged = 0;
        for complaint in recent {
            let outcome = self.detect(&complaint).await?;
            if outcome.is_duplicate && outcome.link_warning.is_none() {
                flagged += 1;
            }
        }
        Ok(flagged)
    }

    fn score_hit(&self, complaint: &Complaint, own_text: &str, hit: ProximityHit) -> SimilarityResult {
        let candidate = hit.complaint;
        let text_sim = text_similarity(own_text, &candidate.text());
        let category_match = candidate.category == complaint.category;
        let overall = score::combine(
            hit.distance_meters,
            self.cfg.radius_meters,
            text_sim,
            category_match,
            &self.cfg.weights,
        );
        SimilarityResult {
            candidate_id: candidate.id,
            candidate_title: candidate.title,
            candidate_status: candidate.status,
            distance_meters: hit.distance_meters,
            text_similarity: text_sim,
            category_match: if category_match { 1.0 } else { 0.0 },
            overall_similarity: overall,
            candidate_created_at: candidate.created_at,
        }
    }

    async fn query_with_retry(
        &self,
        complaint: &Complaint,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProximityHit>, SimilarityError> {
        let mut attempt = 1;
        loop {
            match self
                .index
                .query(complaint.location, self.cfg.radius_meters, filter)
                .await
            {
                Ok(hits) => return Ok(hits),
                Err(SimilarityError::IndexQueryFailed(store_err))
                    if store_err.is_transient() && attempt < self.cfg.retry.max_attempts =>
                {
                    let delay = self.cfg.retry.delay_for(attempt);
                    warn!(
                        "proximity query attempt {attempt} failed ({store_err}), retrying in {delay:?}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Flags the new complaint and links both documents. Both store
    /// operations are idempotent, so the whole unit can be retried.
    async fn link_with_retry(&self, new_id: &str, candidate_id: &str) -> Result<(), SimilarityError> {
        let mut attempt = 1;
        loop {
            let result = async {
                self.store.apply_linkage(new_id, candidate_id).await?;
                self.store.mark_duplicate(new_id).await
            }
            .await;

            match result {
                Ok(()) => return Ok(()),
                Err(store_err)
                    if store_err.is_transient() && attempt < self.cfg.retry.max_attempts =>
                {
                    let delay = self.cfg.retry.delay_for(attempt);
                    warn!(
                        "link update attempt {attempt} failed ({store_err}), retrying in {delay:?}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(store_err) => return Err(SimilarityError::LinkUpdateFailed(store_err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use complaint_store::{
        Category, GeoPoint, ListFilter, MemoryComplaintStore, NewComplaint, Status, StoreError,
    };
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    const BLR: GeoPoint = GeoPoint {
        latitude: 12.9716,
        longitude: 77.5946,
    };

    /// ~`meters` north of `base` (1 degree of latitude ~ 111.19 km).
    fn north_of(base: GeoPoint, meters: f64) -> GeoPoint {
        GeoPoint::new(base.latitude + meters / 111_194.9, base.longitude)
    }

    fn new_complaint(title: &str, category: Category, location: GeoPoint) -> NewComplaint {
        NewComplaint {
            title: title.into(),
            description: String::new(),
            category,
            priority: None,
            location,
            address: None,
            image_url: None,
            audio_url: None,
            user_id: None,
        }
    }

    fn fast_cfg() -> DetectionConfig {
        DetectionConfig {
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(1),
            },
            ..DetectionConfig::default()
        }
    }

    #[tokio::test]
    async fn no_neighbors_is_empty_and_not_duplicate() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        let complaint = store
            .insert(new_complaint("lone pothole", Category::Pothole, BLR))
            .await
            .unwrap();
        let outcome = detector.detect(&complaint).await.unwrap();

        assert!(outcome.matches.is_empty());
        assert!(!outcome.is_duplicate);
        let stored = store.get(&complaint.id).await.unwrap().unwrap();
        assert!(!stored.is_duplicate);
    }

    #[tokio::test]
    async fn partial_overlap_scores_by_the_documented_formula() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        store
            .insert(new_complaint("big pothole by traffic light", Category::Pothole, north_of(BLR, 25.0)))
            .await
            .unwrap();

        let complaint = store
            .insert(new_complaint("large pothole near signal", Category::Pothole, BLR))
            .await
            .unwrap();
        let outcome = detector.detect(&complaint).await.unwrap();

        assert_eq!(outcome.matches.len(), 1);
        let m = &outcome.matches[0];
        assert!((24.0..26.0).contains(&m.distance_meters), "got {}", m.distance_meters);
        // One shared token out of eight unique words.
        assert!((m.text_similarity - 0.125).abs() < 1e-9);
        assert_eq!(m.category_match, 1.0);
        // 0.4 * (1 - 25/50) + 0.4 * 0.125 + 0.2 * 1.0
        assert!((0.40..0.50).contains(&m.overall_similarity), "got {}", m.overall_similarity);
        assert!(!outcome.is_duplicate);
    }

    #[tokio::test]
    async fn duplicate_is_flagged_and_linked_both_ways() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        let original = store
            .insert(new_complaint("large pothole near signal", Category::Pothole, north_of(BLR, 10.0)))
            .await
            .unwrap();
        let complaint = store
            .insert(new_complaint("large pothole near signal", Category::Pothole, BLR))
            .await
            .unwrap();

        let outcome = detector.detect(&complaint).await.unwrap();
        // spatial ~ 0.8, text = 1.0, category = 1.0 -> well above 0.8
        assert!(outcome.is_duplicate);
        assert!(outcome.link_warning.is_none());

        let stored = store.get(&complaint.id).await.unwrap().unwrap();
        assert!(stored.is_duplicate);
        assert_eq!(stored.related_complaints, vec![original.id.clone()]);
        let original = store.get(&original.id).await.unwrap().unwrap();
        assert_eq!(original.related_complaints, vec![complaint.id.clone()]);
        // The prior report is not itself a duplicate.
        assert!(!original.is_duplicate);
    }

    #[tokio::test]
    async fn results_are_ranked_and_capped_at_top_k() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        for meters in [5.0, 10.0, 15.0, 20.0, 30.0, 35.0, 40.0] {
            store
                .insert(new_complaint("pothole", Category::Pothole, north_of(BLR, meters)))
                .await
                .unwrap();
        }
        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();

        let results = detector.rank_similar(&complaint).await.unwrap();
        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].overall_similarity >= pair[1].overall_similarity);
            assert!(pair[0].distance_meters <= pair[1].distance_meters);
        }
    }

    #[tokio::test]
    async fn ties_prefer_the_older_report() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        let spot = north_of(BLR, 5.0);
        let first = store
            .insert(new_complaint("pothole", Category::Pothole, spot))
            .await
            .unwrap();
        let second = store
            .insert(new_complaint("pothole", Category::Pothole, spot))
            .await
            .unwrap();

        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();
        let results = detector.rank_similar(&complaint).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].candidate_id, first.id);
        assert_eq!(results[1].candidate_id, second.id);
    }

    #[tokio::test]
    async fn other_categories_are_not_candidates() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        store
            .insert(new_complaint("overflowing garbage", Category::Garbage, north_of(BLR, 5.0)))
            .await
            .unwrap();
        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();

        let results = detector.rank_similar(&complaint).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn reconcile_fills_missed_links() {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        // Two near-identical reports that "raced": neither was linked.
        let a = store
            .insert(new_complaint("streetlight out", Category::Streetlight, BLR))
            .await
            .unwrap();
        let b = store
            .insert(new_complaint("streetlight out", Category::Streetlight, north_of(BLR, 3.0)))
            .await
            .unwrap();

        let since = Utc::now() - chrono::Duration::hours(1);
        let flagged = detector.reconcile(since).await.unwrap();
        assert!(flagged >= 1);

        let a = store.get(&a.id).await.unwrap().unwrap();
        let b = store.get(&b.id).await.unwrap().unwrap();
        assert!(a.related_complaints.contains(&b.id));
        assert!(b.related_complaints.contains(&a.id));

        // A second pass is a no-op thanks to add-to-set linkage.
        detector.reconcile(since).await.unwrap();
        let a2 = store.get(&a.id).await.unwrap().unwrap();
        assert_eq!(a2.related_complaints, a.related_complaints);
    }

    /// Store wrapper that fails the first N candidate scans / linkages.
    struct FlakyStore {
        inner: MemoryComplaintStore,
        scan_failures: AtomicU32,
        link_failures: AtomicU32,
    }

    impl FlakyStore {
        fn new(scan_failures: u32, link_failures: u32) -> Self {
            Self {
                inner: MemoryComplaintStore::new(),
                scan_failures: AtomicU32::new(scan_failures),
                link_failures: AtomicU32::new(link_failures),
            }
        }

        fn take(counter: &AtomicU32) -> bool {
            counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    impl ComplaintStore for FlakyStore {
        async fn insert(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
            self.inner.insert(new).await
        }

        async fn get(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
            self.inner.get(id).await
        }

        async fn list(&self, filter: &ListFilter) -> Result<Vec<Complaint>, StoreError> {
            self.inner.list(filter).await
        }

        async fn scan_candidates(
            &self,
            filter: &CandidateFilter,
        ) -> Result<Vec<Complaint>, StoreError> {
            if Self::take(&self.scan_failures) {
                return Err(StoreError::Backend("scan timed out".into()));
            }
            self.inner.scan_candidates(filter).await
        }

        async fn update_status(
            &self,
            id: &str,
            status: Status,
            updated_by: Option<String>,
            comment: Option<String>,
        ) -> Result<Complaint, StoreError> {
            self.inner.update_status(id, status, updated_by, comment).await
        }

        async fn record_verification(
            &self,
            id: &str,
            user_id: &str,
            verified: bool,
            feedback: Option<String>,
        ) -> Result<Complaint, StoreError> {
            self.inner
                .record_verification(id, user_id, verified, feedback)
                .await
        }

        async fn apply_linkage(&self, id_a: &str, id_b: &str) -> Result<(), StoreError> {
            if Self::take(&self.link_failures) {
                return Err(StoreError::Backend("write conflict".into()));
            }
            self.inner.apply_linkage(id_a, id_b).await
        }

        async fn mark_duplicate(&self, id: &str) -> Result<(), StoreError> {
            self.inner.mark_duplicate(id).await
        }
    }

    #[tokio::test]
    async fn transient_query_failures_are_retried() {
        let store = Arc::new(FlakyStore::new(2, 0));
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();
        // Two failures, three attempts: the third scan succeeds.
        let outcome = detector.detect(&complaint).await.unwrap();
        assert!(outcome.matches.is_empty());
    }

    #[tokio::test]
    async fn persistent_query_failure_surfaces_after_retries() {
        let store = Arc::new(FlakyStore::new(10, 0));
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();
        let err = detector.detect(&complaint).await.unwrap_err();
        assert!(matches!(err, SimilarityError::IndexQueryFailed(_)));
    }

    #[tokio::test]
    async fn link_failure_degrades_to_warning() {
        let store = Arc::new(FlakyStore::new(0, 10));
        let detector = DuplicateDetector::new(store.clone(), fast_cfg()).unwrap();

        store
            .insert(new_complaint("pothole", Category::Pothole, north_of(BLR, 2.0)))
            .await
            .unwrap();
        let complaint = store
            .insert(new_complaint("pothole", Category::Pothole, BLR))
            .await
            .unwrap();

        let outcome = detector.detect(&complaint).await.unwrap();
        assert!(outcome.is_duplicate);
        assert_eq!(outcome.matches.len(), 1);
        assert!(outcome.link_warning.is_some());
        // The persisted flag was never set: the link unit did not complete.
        let stored = store.get(&complaint.id).await.unwrap().unwrap();
        assert!(!stored.is_duplicate);
        assert!(stored.related_complaints.is_empty());
    }
}
