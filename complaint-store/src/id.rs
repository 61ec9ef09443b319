use uuid::Uuid;

/// Mints a fresh complaint id.
pub fn new_complaint_id() -> String {
    Uuid::new_v4().to_string()
}
