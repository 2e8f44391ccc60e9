//! HTTP handlers for the song catalog

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use core_library::models::release_date;
use core_service::{
    Page, PageRequest, Song, SongFilter, SongService, DEFAULT_SONGS_PAGE_SIZE,
    DEFAULT_VERSES_PAGE_SIZE,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub type AppState = Arc<SongService>;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub group: String,
    pub song: String,
}

/// Replacement field values for an existing song
#[derive(Debug, Deserialize)]
pub struct UpdateSongRequest {
    #[serde(alias = "group")]
    pub group_name: String,
    #[serde(alias = "song")]
    pub song_name: String,
    #[serde(alias = "releaseDate", with = "release_date")]
    pub release_date: NaiveDate,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

impl UpdateSongRequest {
    fn into_song(self, id: String) -> Song {
        Song {
            id,
            group_name: self.group_name,
            song_name: self.song_name,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Page parameters from the query string; unparsable values fall back to defaults.
fn page_request(params: &HashMap<String, String>, default_size: u32) -> PageRequest {
    let number = |name: &str| params.get(name).and_then(|v| v.trim().parse::<i64>().ok());
    PageRequest::from_params(number("page"), number("pageSize"), default_size)
}

fn decode<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection, "Undecodable request body");
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })
}

pub async fn list_songs(
    State(service): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Page<Song>>> {
    let filter = SongFilter::from_map(&params);
    let page = page_request(&params, DEFAULT_SONGS_PAGE_SIZE);
    Ok(Json(service.get_songs_paginated(&filter, page).await?))
}

pub async fn all_songs(State(service): State<AppState>) -> ApiResult<Json<Vec<Song>>> {
    Ok(Json(service.get_all_songs().await?))
}

pub async fn add_song(
    State(service): State<AppState>,
    body: Result<Json<AddSongRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = decode(body)?;
    let song = service.add_song(&request.group, &request.song).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

pub async fn get_song(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Song>> {
    Ok(Json(service.get_song(&id).await?))
}

pub async fn update_song(
    State(service): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let request = decode(body)?;
    let song = request.into_song(id.clone());
    Ok(Json(service.update_song(&id, song).await?))
}

pub async fn delete_song(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.delete_song(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn song_lyrics(
    State(service): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Page<String>>> {
    let page = page_request(&params, DEFAULT_VERSES_PAGE_SIZE);
    Ok(Json(service.get_lyrics_paginated(&id, page).await?))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
