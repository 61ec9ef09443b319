//! Core data models used across the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite coordinates within the valid lat/lng ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Fixed complaint categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pothole,
    Garbage,
    Streetlight,
    Drainage,
    WaterLeakage,
    PowerOutage,
    Other,
}

/// Linear complaint workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Submitted,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Municipal department a complaint is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Roads Department")]
    Roads,
    #[serde(rename = "Sanitation Department")]
    Sanitation,
    #[serde(rename = "Electricity Department")]
    Electricity,
    #[serde(rename = "Water Department")]
    Water,
    #[serde(rename = "Other")]
    Other,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Roads,
        Department::Sanitation,
        Department::Electricity,
        Department::Water,
        Department::Other,
    ];

    /// Wire spelling, matching the serde rename.
    pub fn name(&self) -> &'static str {
        match self {
            Department::Roads => "Roads Department",
            Department::Sanitation => "Sanitation Department",
            Department::Electricity => "Electricity Department",
            Department::Water => "Water Department",
            Department::Other => "Other",
        }
    }

    /// Inverse of [`name`](Self::name); `None` for unknown spellings.
    pub fn parse(s: &str) -> Option<Department> {
        Self::ALL.into_iter().find(|d| d.name() == s)
    }
}

/// Fixed category-to-department routing.
impl From<Category> for Department {
    fn from(category: Category) -> Self {
        match category {
            Category::Pothole => Department::Roads,
            Category::Garbage => Department::Sanitation,
            Category::Streetlight | Category::PowerOutage => Department::Electricity,
            Category::Drainage | Category::WaterLeakage => Department::Water,
            Category::Other => Department::Other,
        }
    }
}

/// One entry in the status audit trail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusHistory {
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Canonical complaint document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub status: Status,
    pub location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub assigned_department: Department,
    pub status_history: Vec<StatusHistory>,
    pub verified_by_citizen: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_feedback: Option<String>,
    /// Ids of related complaints. Mutually maintained: if A lists B,
    /// B lists A (see `ComplaintStore::apply_linkage`).
    #[serde(default)]
    pub related_complaints: Vec<String>,
    #[serde(default)]
    pub is_duplicate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Free-text body used for lexical comparison.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Fields supplied by the submission flow; the store assigns the rest.
#[derive(Clone, Debug)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Option<Priority>,
    pub location: GeoPoint,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_validity_ranges() {
        assert!(GeoPoint::new(12.9716, 77.5946).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn department_routing() {
        assert_eq!(Department::from(Category::Pothole), Department::Roads);
        assert_eq!(Department::from(Category::PowerOutage), Department::Electricity);
        assert_eq!(Department::from(Category::Drainage), Department::Water);
        assert_eq!(Department::from(Category::Other), Department::Other);
    }

    #[test]
    fn department_names_round_trip() {
        for d in Department::ALL {
            assert_eq!(Department::parse(d.name()), Some(d));
        }
        assert_eq!(Department::parse("Parks Department"), None);
        assert_eq!(Department::parse("roads department"), None);
    }

    #[test]
    fn category_serde_uses_snake_case() {
        let s = serde_json::to_string(&Category::WaterLeakage).unwrap();
        assert_eq!(s, "\"water_leakage\"");
        let s = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(s, "\"In Progress\"");
    }
}
