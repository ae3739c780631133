// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food catalogue and the TACO reference table.

use serde::Serialize;
use validator::Validate;

use crate::error::Result;
use crate::models::food::ImportedFood;
use crate::models::{Food, FoodPage, NewFood, TacoSearchResult};
use crate::services::api::{path_segment, ApiClient};
use crate::services::session::SessionStore;

/// Page requested when none is given.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size requested when none is given.
pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Serialize)]
struct TacoImportRequest {
    taco_id: u64,
}

/// Food calls.
#[derive(Clone)]
pub struct FoodService {
    api: ApiClient,
    session: SessionStore,
}

impl FoodService {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub async fn create(&self, food: &NewFood) -> Result<Food> {
        food.validate()?;
        let token = self.session.token()?;
        let created: Food = self.api.post_json("/foods", Some(&token), food).await?;
        tracing::info!(food_id = %created.id, name = %created.name, "Food created");
        Ok(created)
    }

    /// One page of foods, optionally filtered by name.
    pub async fn list(
        &self,
        search: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<FoodPage> {
        let token = self.session.token()?;

        let mut query = vec![
            ("page", page.unwrap_or(DEFAULT_PAGE).to_string()),
            ("limit", limit.unwrap_or(DEFAULT_LIMIT).to_string()),
        ];
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }

        self.api
            .get_json_with_query("/foods", Some(&token), &query)
            .await
    }

    pub async fn get(&self, food_id: &str) -> Result<Food> {
        let token = self.session.token()?;
        let path = format!("/foods/{}", path_segment(food_id));
        self.api.get_json(&path, Some(&token)).await
    }

    /// Search TACO. A blank query returns an empty result without a request.
    pub async fn taco_search(&self, query: &str) -> Result<TacoSearchResult> {
        let token = self.session.token()?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(TacoSearchResult::empty());
        }

        self.api
            .get_json_with_query(
                "/foods/taco/search",
                Some(&token),
                &[("q", query.to_string())],
            )
            .await
    }

    /// Copy a TACO entry into the user's foods.
    pub async fn taco_import(&self, taco_id: u64) -> Result<Food> {
        let token = self.session.token()?;
        let imported: ImportedFood = self
            .api
            .post_json("/foods/taco/import", Some(&token), &TacoImportRequest { taco_id })
            .await?;
        tracing::info!(taco_id, food_id = %imported.food.id, "TACO food imported");
        Ok(imported.food)
    }
}
