use crate::dtos::UserDTO;
use agenda_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod register_user {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    pub type APIResponse = UserResponse;
}

pub mod login_user {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub access_token: String,
        pub refresh_token: String,
        pub user: UserDTO,
    }

    impl APIResponse {
        pub fn new(access_token: String, refresh_token: String, user: User) -> Self {
            Self {
                access_token,
                refresh_token,
                user: UserDTO::new(user),
            }
        }
    }
}

pub mod refresh_token {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub refresh_token: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub access_token: String,
        pub refresh_token: String,
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}
