//! In-memory reference implementation of `ComplaintStore`.
//!
//! Backed by a `tokio::sync::RwLock` over a `HashMap`. The dual-document
//! linkage runs under a single write guard, which gives the same atomicity a
//! document store would get from a transaction.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::errors::StoreError;
use crate::filters::{CandidateFilter, ListFilter};
use crate::id::new_complaint_id;
use crate::model::{Complaint, Department, NewComplaint, Status, StatusHistory};
use crate::ComplaintStore;

#[derive(Default)]
pub struct MemoryComplaintStore {
    docs: RwLock<HashMap<String, Complaint>>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored complaints.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

fn matches_list_filter(c: &Complaint, f: &ListFilter) -> bool {
    if let Some(cat) = f.category {
        if c.category != cat {
            return false;
        }
    }
    if let Some(status) = f.status {
        if c.status != status {
            return false;
        }
    }
    if let Some(department) = f.department {
        if c.assigned_department != department {
            return false;
        }
    }
    if let Some(user_id) = &f.user_id {
        if c.user_id.as_deref() != Some(user_id.as_str()) {
            return false;
        }
    }
    if let Some(bbox) = &f.bbox {
        let p = c.location;
        if p.latitude < bbox.min_lat
            || p.latitude > bbox.max_lat
            || p.longitude < bbox.min_lng
            || p.longitude > bbox.max_lng
        {
            return false;
        }
    }
    if let Some(min) = f.min_created_at {
        if c.created_at < min {
            return false;
        }
    }
    true
}

impl ComplaintStore for MemoryComplaintStore {
    async fn insert(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let now = Utc::now();
        let id = new_complaint_id();
        trace!("MemoryComplaintStore::insert id={id}");

        let complaint = Complaint {
            id: id.clone(),
            title: new.title,
            description: new.description,
            category: new.category,
            priority: new.priority,
            status: Status::Submitted,
            location: new.location,
            address: new.address,
            image_url: new.image_url,
            audio_url: new.audio_url,
            user_id: new.user_id.clone(),
            assigned_department: Department::from(new.category),
            status_history: vec![StatusHistory {
                status: Status::Submitted,
                timestamp: now,
                updated_by: new.user_id,
                comment: Some("Complaint submitted".into()),
            }],
            verified_by_citizen: false,
            verification_feedback: None,
            related_complaints: Vec::new(),
            is_duplicate: false,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };

        self.docs.write().await.insert(id, complaint.clone());
        Ok(complaint)
    }

    async fn get(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        Ok(self.docs.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Complaint>, StoreError> {
        let docs = self.docs.read().await;
        let mut out: Vec<Complaint> = docs
            .values()
            .filter(|c| matches_list_filter(c, filter))
            .cloned()
            .collect();
        // Newest first; id as a stable tie-break for same-instant documents.
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        trace!("MemoryComplaintStore::list matched={}", out.len());
        Ok(out)
    }

    async fn scan_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Complaint>, StoreError> {
        let docs = self.docs.read().await;
        let out: Vec<Complaint> = docs
            .values()
            .filter(|c| {
                if let Some(cat) = filter.category {
                    if c.category != cat {
                        return false;
                    }
                }
                if let Some(min) = filter.min_created_at {
                    if c.created_at < min {
                        return false;
                    }
                }
                if let Some(exclude) = &filter.exclude_id {
                    if &c.id == exclude {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        trace!("MemoryComplaintStore::scan_candidates matched={}", out.len());
        Ok(out)
    }

    async fn update_status(
        &self,
        id: &str,
        status: Status,
        updated_by: Option<String>,
        comment: Option<String>,
    ) -> Result<Complaint, StoreError> {
        let mut docs = self.docs.write().await;
        let complaint = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.into()))?;

        let now = Utc::now();
        complaint.status = status;
        complaint.updated_at = now;
        if status == Status::Resolved {
            complaint.resolved_at = Some(now);
        }
        complaint.status_history.push(StatusHistory {
            status,
            timestamp: now,
            updated_by,
            comment,
        });

        debug!("MemoryComplaintStore::update_status id={id} status={status:?}");
        Ok(complaint.clone())
    }

    async fn record_verification(
        &self,
        id: &str,
        user_id: &str,
        verified: bool,
        feedback: Option<String>,
    ) -> Result<Complaint, StoreError> {
        let mut docs = self.docs.write().await;
        let complaint = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.into()))?;

        if complaint.user_id.as_deref() != Some(user_id) {
            return Err(StoreError::Forbidden(
                "not authorized to verify this complaint".into(),
            ));
        }
        if complaint.status != Status::Resolved {
            return Err(StoreError::Conflict(
                "complaint is not yet marked as resolved".into(),
            ));
        }

        let now = Utc::now();
        complaint.verified_by_citizen = verified;
        complaint.verification_feedback = feedback.clone();
        complaint.updated_at = now;
        complaint.status_history.push(StatusHistory {
            status: Status::Resolved,
            timestamp: now,
            updated_by: Some(user_id.into()),
            comment: Some(format!(
                "Citizen verification: {}",
                if verified { "confirmed" } else { "not confirmed" }
            )),
        });

        Ok(complaint.clone())
    }

    async fn apply_linkage(&self, id_a: &str, id_b: &str) -> Result<(), StoreError> {
        // Single write guard: both sides land together or not at all.
        let mut docs = self.docs.write().await;
        if !docs.contains_key(id_a) {
            return Err(StoreError::NotFound(id_a.into()));
        }
        if !docs.contains_key(id_b) {
            return Err(StoreError::NotFound(id_b.into()));
        }

        let now = Utc::now();
        for (id, other) in [(id_a, id_b), (id_b, id_a)] {
            if let Some(doc) = docs.get_mut(id) {
                if !doc.related_complaints.iter().any(|r| r == other) {
                    doc.related_complaints.push(other.into());
                    doc.updated_at = now;
                }
            }
        }

        debug!("MemoryComplaintStore::apply_linkage {id_a} <-> {id_b}");
        Ok(())
    }

    async fn mark_duplicate(&self, id: &str) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let complaint = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.into()))?;
        if !complaint.is_duplicate {
            complaint.is_duplicate = true;
            complaint.updated_at = Utc::now();
        }
        Ok(())
    }
}
