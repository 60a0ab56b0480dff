//! Auth and profile flows
//!
//! Login establishes the session (token first, then the profile fetched with
//! the fresh token); logout, password change, and account deletion all clear
//! it, which forces the next authenticated call to fail fast instead of
//! riding a dead token.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{Value, json};

use super::insert_opt;
use super::model::{Envelope, LoginData, UserProfile};
use crate::cache::{CacheCategory, Params};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;
use crate::session::{Session, SessionUser};
use crate::transport::{FilePart, MultipartForm};

/// Login credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username or email
    pub username: String,
    /// Password
    pub password: String,
}

/// Fields for customer registration
#[derive(Debug, Clone)]
pub struct CustomerRegistration {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Password
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Contact phone
    pub phone: String,
    /// Address
    pub address: String,
    /// PIN code
    pub pin_code: String,
}

/// Fields for professional registration
///
/// Registration is a multipart request because the verification document
/// travels with it.
#[derive(Debug, Clone)]
pub struct ProfessionalRegistration {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Password
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Contact phone
    pub phone: String,
    /// Offered service type
    pub service_type_id: i64,
    /// Years of experience
    pub experience: i32,
    /// Self-description
    pub description: Option<String>,
    /// Verification document (PDF, JPG or PNG)
    pub document: FilePart,
}

/// Updatable profile fields; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Contact email
    pub email: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Address
    pub address: Option<String>,
    /// PIN code
    pub pin_code: Option<String>,
    /// Professional self-description
    pub description: Option<String>,
}

/// Client for auth and profile endpoints
pub struct AuthApi {
    client: Arc<ApiClient>,
    session: Arc<dyn Session>,
}

impl AuthApi {
    /// Create the auth client
    #[must_use]
    pub fn new(client: Arc<ApiClient>, session: Arc<dyn Session>) -> Self {
        Self { client, session }
    }

    /// Log in and establish the session
    ///
    /// On success the session holds the fresh token and the user fetched
    /// with it; on failure the session is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let value = self
            .client
            .post(
                "login",
                json!({
                    "username": credentials.username,
                    "password": credentials.password,
                }),
            )
            .await?;
        let login: Envelope<LoginData> = Envelope::from_value(value)?;

        // Token first, so the profile fetch below goes out authenticated
        self.session.establish(login.data.token);

        let profile = self.profile(true).await?;
        self.session.set_user(SessionUser {
            full_name: profile.data.full_name.clone(),
            role: profile.data.role.clone(),
        });

        Ok(profile.data)
    }

    /// Drop the session and every cached response
    ///
    /// Cached payloads belong to the account that fetched them; they must
    /// not survive into the next login.
    pub fn logout(&self) {
        self.session.clear();
        self.client.clear_cache();
    }

    /// The signed-in user's profile
    pub async fn profile(&self, force_refresh: bool) -> Result<Envelope<UserProfile>> {
        let mut options = ReadOptions::category(CacheCategory::Detail);
        options.force_refresh = force_refresh;

        let value = self.client.read("profile", &Params::new(), options).await?;
        Envelope::from_value(value)
    }

    /// Register a customer account
    pub async fn register_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<Envelope<Value>> {
        let value = self
            .client
            .post(
                "register/customer",
                json!({
                    "username": registration.username,
                    "email": registration.email,
                    "password": registration.password,
                    "full_name": registration.full_name,
                    "phone": registration.phone,
                    "address": registration.address,
                    "pin_code": registration.pin_code,
                }),
            )
            .await?;
        Envelope::from_value(value)
    }

    /// Register a professional account with its verification document
    pub async fn register_professional(
        &self,
        registration: ProfessionalRegistration,
    ) -> Result<Envelope<Value>> {
        let mut form = MultipartForm::new()
            .text("username", registration.username)
            .text("email", registration.email)
            .text("password", registration.password)
            .text("full_name", registration.full_name)
            .text("phone", registration.phone)
            .text("service_type_id", registration.service_type_id.to_string())
            .text("experience", registration.experience.to_string());
        if let Some(description) = registration.description {
            form = form.text("description", description);
        }
        form = form.file(registration.document);

        let value = self
            .client
            .upload(Method::POST, "register/professional", form)
            .await?;
        Envelope::from_value(value)
    }

    /// Update the signed-in user's profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Envelope<UserProfile>> {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "email", update.email.clone().map(Value::from));
        insert_opt(&mut body, "full_name", update.full_name.clone().map(Value::from));
        insert_opt(&mut body, "phone", update.phone.clone().map(Value::from));
        insert_opt(&mut body, "address", update.address.clone().map(Value::from));
        insert_opt(&mut body, "pin_code", update.pin_code.clone().map(Value::from));
        insert_opt(&mut body, "description", update.description.clone().map(Value::from));

        let value = self.client.put("profile", Value::Object(body)).await?;
        let envelope: Envelope<UserProfile> = Envelope::from_value(value)?;

        self.session.set_user(SessionUser {
            full_name: envelope.data.full_name.clone(),
            role: envelope.data.role.clone(),
        });

        Ok(envelope)
    }

    /// Replace the verification document (professional)
    pub async fn update_document(&self, document: FilePart) -> Result<Envelope<Value>> {
        let value = self
            .client
            .upload(
                Method::PUT,
                "professionals/document",
                MultipartForm::new().file(document),
            )
            .await?;
        Envelope::from_value(value)
    }

    /// Change the offered service type (professional)
    pub async fn update_service_type(&self, service_type_id: i64) -> Result<Envelope<Value>> {
        let value = self
            .client
            .put(
                "professionals/service",
                json!({"service_type_id": service_type_id}),
            )
            .await?;
        Envelope::from_value(value)
    }

    /// Change the password; the session is cleared so the user logs in again
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<Envelope<Value>> {
        let value = self
            .client
            .post(
                "change-password",
                json!({
                    "old_password": old_password,
                    "new_password": new_password,
                }),
            )
            .await?;
        let envelope = Envelope::from_value(value)?;

        self.session.clear();
        Ok(envelope)
    }

    /// Delete the account after re-authenticating with the password
    pub async fn delete_account(&self, password: &str) -> Result<Envelope<Value>> {
        let value = self
            .client
            .delete("delete-account", Some(json!({"password": password})))
            .await?;
        let envelope = Envelope::from_value(value)?;

        self.session.clear();
        self.client.clear_cache();
        Ok(envelope)
    }
}
