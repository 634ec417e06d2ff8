#[derive(serde::Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub emails: Vec<String>,
}
