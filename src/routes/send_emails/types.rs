#[derive(serde::Deserialize)]
pub struct BodySchema {
    pub emails: Vec<String>,
    pub subject: String,
    pub message: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsResponse {
    pub success: bool,
    pub message: String,
    pub failed_emails: Vec<String>,
}
