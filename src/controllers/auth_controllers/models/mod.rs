use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub user_id: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
}
