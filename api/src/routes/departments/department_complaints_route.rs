//! GET /api/departments/{dept_name}/complaints — a department's work queue.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use complaint_store::{ComplaintStore, ListFilter};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::departments::{
        department_requests::DepartmentComplaintsQuery,
        department_responses::DepartmentComplaintsResponse, parse_department,
    },
};

pub async fn department_complaints(
    State(state): State<Arc<AppState>>,
    Path(dept_name): Path<String>,
    Query(query): Query<DepartmentComplaintsQuery>,
) -> AppResult<Json<DepartmentComplaintsResponse>> {
    let department = parse_department(&dept_name)?;

    let complaints = state
        .store
        .list(&ListFilter {
            department: Some(department),
            status: query.status,
            ..ListFilter::default()
        })
        .await?;

    let total_complaints = complaints.len();
    let complaints: Vec<_> = complaints
        .into_iter()
        .skip(query.skip)
        .take(query.limit)
        .collect();

    Ok(Json(DepartmentComplaintsResponse {
        department: department.name(),
        total_complaints,
        returned_count: complaints.len(),
        complaints,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::AppError;
    use complaint_store::{Category, GeoPoint, MemoryComplaintStore, NewComplaint};
    use similarity_engine::{ClusterConfig, DetectionConfig, DuplicateDetector};

    fn app_state() -> Arc<AppState> {
        let store = Arc::new(MemoryComplaintStore::new());
        let detector = DuplicateDetector::new(store.clone(), DetectionConfig::default()).unwrap();
        Arc::new(AppState {
            store,
            detector,
            cluster_cfg: ClusterConfig::default(),
        })
    }

    fn new_complaint(title: &str, category: Category) -> NewComplaint {
        NewComplaint {
            title: title.into(),
            description: "description".into(),
            category,
            priority: None,
            location: GeoPoint::new(12.9716, 77.5946),
            address: None,
            image_url: None,
            audio_url: None,
            user_id: None,
        }
    }

    fn default_query() -> DepartmentComplaintsQuery {
        DepartmentComplaintsQuery {
            status: None,
            limit: 100,
            skip: 0,
        }
    }

    #[tokio::test]
    async fn lists_only_the_departments_complaints() {
        let state = app_state();
        state
            .store
            .insert(new_complaint("pothole", Category::Pothole))
            .await
            .unwrap();
        state
            .store
            .insert(new_complaint("garbage pile", Category::Garbage))
            .await
            .unwrap();

        let Json(body) = department_complaints(
            State(state),
            Path("Roads Department".into()),
            Query(default_query()),
        )
        .await
        .unwrap();

        assert_eq!(body.department, "Roads Department");
        assert_eq!(body.total_complaints, 1);
        assert_eq!(body.returned_count, 1);
        assert_eq!(body.complaints[0].title, "pothole");
    }

    #[tokio::test]
    async fn pagination_keeps_the_full_count() {
        let state = app_state();
        for i in 0..4 {
            state
                .store
                .insert(new_complaint(&format!("pothole {i}"), Category::Pothole))
                .await
                .unwrap();
        }

        let Json(body) = department_complaints(
            State(state),
            Path("Roads Department".into()),
            Query(DepartmentComplaintsQuery {
                status: None,
                limit: 2,
                skip: 1,
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.total_complaints, 4);
        assert_eq!(body.returned_count, 2);
    }

    #[tokio::test]
    async fn unknown_department_is_rejected_with_the_valid_options() {
        let err = department_complaints(
            State(app_state()),
            Path("Parks Department".into()),
            Query(default_query()),
        )
        .await
        .unwrap_err();

        match err {
            AppError::BadRequest(msg) => {
                assert!(msg.contains("Parks Department"), "got {msg}");
                assert!(msg.contains("Roads Department"), "got {msg}");
                assert!(msg.contains("Sanitation Department"), "got {msg}");
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
