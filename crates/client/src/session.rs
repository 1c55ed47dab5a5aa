//! Authenticated session.
//!
//! A [`Session`] is created by logging in and holds the bearer token until
//! [`Session::logout`] or until the server answers a call with 401, at which
//! point the token is dropped and every later call fails fast.

use parish_core::member::FamilyRole;
use parish_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::directory::MemberQuery;
use crate::types::{
    DataResponse, GalleryImage, LoginResponse, Member, MemberListItem, Page, UploadedFile,
    UserInfo,
};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

#[derive(Debug)]
pub struct Session {
    http: HttpClient,
    token: RwLock<Option<String>>,
    user: UserInfo,
}

impl Session {
    /// `POST /auth/login`. A 401 here is a plain bad-credentials error.
    pub async fn login(config: &ClientConfig, email: &str, password: &str) -> ClientResult<Self> {
        let http = HttpClient::new(config)?;
        let body = json!({ "email": email, "password": password });
        let response: LoginResponse = http.post("auth/login", &body, None).await?;

        tracing::debug!(user_id = response.user.id, "Session started");
        Ok(Self {
            http,
            token: RwLock::new(Some(response.access_token)),
            user: response.user,
        })
    }

    /// Drop the token locally. The API keeps no server-side session.
    pub async fn logout(&self) {
        self.token.write().await.take();
        tracing::debug!(user_id = self.user.id, "Session closed");
    }

    pub async fn is_active(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// The user this session logged in as.
    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    async fn token(&self) -> ClientResult<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".into()))
    }

    /// Tear the session down on 401 and pass the error through.
    async fn check<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(ClientError::Unauthorized(msg)) = &result {
            if self.token.write().await.take().is_some() {
                tracing::warn!(user_id = self.user.id, reason = %msg, "Session rejected by server");
            }
        }
        result
    }

    // ========== Transport ==========

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let token = self.token().await?;
        let result = self.http.get(path, query, Some(&token)).await;
        self.check(result).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let token = self.token().await?;
        let result = self.http.post(path, body, Some(&token)).await;
        self.check(result).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let token = self.token().await?;
        let result = self.http.put(path, body, Some(&token)).await;
        self.check(result).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let token = self.token().await?;
        let result = self.http.delete(path, Some(&token)).await;
        self.check(result).await
    }

    // ========== Members ==========

    /// `GET /admin/members` with search, filter, sort and paging.
    pub async fn list_members(&self, query: &MemberQuery) -> ClientResult<Page<MemberListItem>> {
        self.get("admin/members", &query.to_pairs()).await
    }

    pub async fn approve_member(&self, id: DbId) -> ClientResult<Member> {
        let response: DataResponse<Member> = self
            .post(&format!("admin/members/{id}/approve"), &json!({}))
            .await?;
        Ok(response.data)
    }

    /// `PUT /admin/members/{id}/family`.
    pub async fn assign_family(
        &self,
        member_id: DbId,
        family_id: DbId,
        house_id: Option<DbId>,
        family_role: Option<FamilyRole>,
    ) -> ClientResult<Member> {
        let body = json!({
            "family_id": family_id,
            "house_id": house_id,
            "family_role": family_role,
        });
        let response: DataResponse<Member> = self
            .put(&format!("admin/members/{member_id}/family"), &body)
            .await?;
        Ok(response.data)
    }

    // ========== Uploads and gallery ==========

    /// `POST /common/upload`; returns the public URL.
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        let token = self.token().await?;
        let result: ClientResult<UploadedFile> = self
            .http
            .post_file("common/upload", file_name, bytes, Some(&token))
            .await;
        Ok(self.check(result).await?.url)
    }

    /// `POST /admin/gallery/albums/{id}/images` with already-uploaded URLs.
    pub async fn link_album_images(
        &self,
        album_id: DbId,
        urls: &[String],
    ) -> ClientResult<Vec<GalleryImage>> {
        let response: DataResponse<Vec<GalleryImage>> = self
            .post(
                &format!("admin/gallery/albums/{album_id}/images"),
                &json!({ "urls": urls }),
            )
            .await?;
        Ok(response.data)
    }
}
